//! Upstream chain RPC access
//!
//! `RpcGateway` is the only seam between the metric fetchers and the
//! network. Everything typed lives in `RpcMethods`, which every gateway gets
//! for free.

mod client;
mod methods;
#[cfg(test)]
pub(crate) mod testing;
mod types;

pub use client::{extract_result, HttpRpcGateway};
pub use methods::{
    RpcMethods, GET_EPOCH_INFO, GET_LATEST_BLOCKHASH, GET_SLOT, GET_SUPPLY, GET_VOTE_ACCOUNTS,
};
pub use types::{
    RpcBlockhashValue, RpcEpochInfo, RpcError, RpcLatestBlockhash, RpcResult, RpcSupply,
    RpcSupplyValue, RpcVoteAccount, RpcVoteAccounts,
};

use crate::metrics::RequestContext;
use async_trait::async_trait;
use serde_json::Value;

/// Raw JSON-RPC access to one chain endpoint
#[async_trait]
pub trait RpcGateway: Send + Sync {
    /// Perform one call and return the envelope's `result`
    async fn execute_raw(&self, ctx: &RequestContext, method: &str, params: Value)
        -> RpcResult<Value>;

    /// Endpoint description for logs and status output
    fn endpoint(&self) -> &str;

    fn commitment(&self) -> &str {
        "confirmed"
    }
}
