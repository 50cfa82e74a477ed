use super::{MetricFetcher, MetricKind, RateEstimator, RequestContext, TransactionSnapshot};
use crate::errors::FetchResult;
use crate::rpc::{RpcGateway, RpcMethods};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

/// Cumulative transaction count plus a counter-delta TPS
///
/// The count comes from `getEpochInfo.transactionCount`. The estimator is
/// private to this fetcher and lives as long as its poller.
pub struct TransactionsFetcher {
    gateway: Arc<dyn RpcGateway>,
    estimator: RateEstimator,
}

impl TransactionsFetcher {
    pub fn new(gateway: Arc<dyn RpcGateway>) -> Self {
        Self {
            gateway,
            estimator: RateEstimator::new(),
        }
    }
}

#[async_trait]
impl MetricFetcher for TransactionsFetcher {
    type Output = TransactionSnapshot;

    fn kind(&self) -> MetricKind {
        MetricKind::Transactions
    }

    async fn fetch(&mut self, ctx: &RequestContext) -> FetchResult<TransactionSnapshot> {
        let info = self.gateway.get_epoch_info(ctx).await?;
        let total = info.transaction_count.unwrap_or(0);

        let now = Utc::now();
        let tps = self.estimator.observe(total, now.timestamp_millis());

        Ok(TransactionSnapshot {
            total_transactions: total,
            transactions_per_second: tps,
            timestamp: now,
        })
    }
}
