//! Typed read methods built on `RpcGateway::execute_raw`
//!
//! Gateway failures become `FetchError::UpstreamUnavailable`; a `result`
//! that cannot be decoded at all becomes `FetchError::MalformedResponse`.

use super::types::{RpcEpochInfo, RpcLatestBlockhash, RpcSupply, RpcVoteAccounts};
use super::RpcGateway;
use crate::errors::{FetchError, FetchResult};
use crate::metrics::RequestContext;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

pub const GET_SUPPLY: &str = "getSupply";
pub const GET_EPOCH_INFO: &str = "getEpochInfo";
pub const GET_VOTE_ACCOUNTS: &str = "getVoteAccounts";
pub const GET_SLOT: &str = "getSlot";
pub const GET_LATEST_BLOCKHASH: &str = "getLatestBlockhash";

#[async_trait]
pub trait RpcMethods {
    async fn get_supply(&self, ctx: &RequestContext) -> FetchResult<RpcSupply>;

    async fn get_epoch_info(&self, ctx: &RequestContext) -> FetchResult<RpcEpochInfo>;

    async fn get_vote_accounts(&self, ctx: &RequestContext) -> FetchResult<RpcVoteAccounts>;

    async fn get_slot(&self, ctx: &RequestContext) -> FetchResult<u64>;

    async fn get_latest_blockhash(&self, ctx: &RequestContext) -> FetchResult<RpcLatestBlockhash>;
}

#[async_trait]
impl<G: RpcGateway + ?Sized> RpcMethods for G {
    async fn get_supply(&self, ctx: &RequestContext) -> FetchResult<RpcSupply> {
        let params = json!([{
            "commitment": self.commitment(),
            "excludeNonCirculatingAccountsList": true,
        }]);
        call(self, ctx, GET_SUPPLY, params).await
    }

    async fn get_epoch_info(&self, ctx: &RequestContext) -> FetchResult<RpcEpochInfo> {
        let params = json!([{ "commitment": self.commitment() }]);
        call(self, ctx, GET_EPOCH_INFO, params).await
    }

    async fn get_vote_accounts(&self, ctx: &RequestContext) -> FetchResult<RpcVoteAccounts> {
        let params = json!([{ "commitment": self.commitment() }]);
        call(self, ctx, GET_VOTE_ACCOUNTS, params).await
    }

    async fn get_slot(&self, ctx: &RequestContext) -> FetchResult<u64> {
        let params = json!([{ "commitment": self.commitment() }]);
        call(self, ctx, GET_SLOT, params).await
    }

    async fn get_latest_blockhash(&self, ctx: &RequestContext) -> FetchResult<RpcLatestBlockhash> {
        let params = json!([{ "commitment": self.commitment() }]);
        call(self, ctx, GET_LATEST_BLOCKHASH, params).await
    }
}

async fn call<G, T>(gateway: &G, ctx: &RequestContext, method: &str, params: Value) -> FetchResult<T>
where
    G: RpcGateway + ?Sized,
    T: DeserializeOwned,
{
    let raw = gateway.execute_raw(ctx, method, params).await?;
    decode(method, raw)
}

fn decode<T: DeserializeOwned>(method: &str, raw: Value) -> FetchResult<T> {
    serde_json::from_value(raw).map_err(|e| FetchError::malformed(method, e.to_string()))
}
