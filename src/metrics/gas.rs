use super::{lamports_to_units, GasSnapshot, MetricFetcher, MetricKind, RequestContext};
use crate::errors::FetchResult;
use crate::rpc::{RpcGateway, RpcMethods};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

/// Fee tiers for a single-signature transaction
///
/// The chain charges a fixed base fee per signature, so the "normal" tier is
/// configuration. A `getLatestBlockhash` round trip confirms the node is
/// answering; its failure fails the fetch.
pub struct GasFetcher {
    gateway: Arc<dyn RpcGateway>,
    base_fee_lamports: u64,
    priority_multiplier: f64,
}

impl GasFetcher {
    pub fn new(gateway: Arc<dyn RpcGateway>, base_fee_lamports: u64, priority_multiplier: f64) -> Self {
        Self {
            gateway,
            base_fee_lamports,
            priority_multiplier,
        }
    }
}

#[async_trait]
impl MetricFetcher for GasFetcher {
    type Output = GasSnapshot;

    fn kind(&self) -> MetricKind {
        MetricKind::Gas
    }

    async fn fetch(&mut self, ctx: &RequestContext) -> FetchResult<GasSnapshot> {
        self.gateway.get_latest_blockhash(ctx).await?;

        let normal = lamports_to_units(self.base_fee_lamports);
        Ok(GasSnapshot {
            normal,
            fast: normal * self.priority_multiplier,
            timestamp: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::testing::ScriptedGateway;
    use crate::rpc::{RpcError, GET_LATEST_BLOCKHASH};
    use serde_json::json;

    #[tokio::test]
    async fn test_default_fee_tiers() {
        let gateway = ScriptedGateway::new().respond(
            GET_LATEST_BLOCKHASH,
            json!({ "value": { "blockhash": "abc", "lastValidBlockHeight": 10 } }),
        );
        let mut fetcher = GasFetcher::new(Arc::new(gateway), 5_000, 1.5);
        let snapshot = fetcher
            .fetch(&RequestContext::new(MetricKind::Gas))
            .await
            .unwrap();
        assert_eq!(snapshot.normal, 0.000005);
        assert!((snapshot.fast - 0.0000075).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_unreachable_node_fails_gas_fetch() {
        let gateway = ScriptedGateway::new().fail(GET_LATEST_BLOCKHASH, RpcError::Timeout);
        let mut fetcher = GasFetcher::new(Arc::new(gateway), 5_000, 1.5);
        assert!(fetcher
            .fetch(&RequestContext::new(MetricKind::Gas))
            .await
            .is_err());
    }
}
