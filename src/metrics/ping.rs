use super::{MetricFetcher, MetricKind, PingSnapshot, RequestContext};
use crate::errors::FetchResult;
use crate::rpc::{RpcGateway, RpcMethods};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::time::Instant;

/// Round-trip latency of one `getSlot` call
pub struct PingFetcher {
    gateway: Arc<dyn RpcGateway>,
}

impl PingFetcher {
    pub fn new(gateway: Arc<dyn RpcGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl MetricFetcher for PingFetcher {
    type Output = PingSnapshot;

    fn kind(&self) -> MetricKind {
        MetricKind::Ping
    }

    async fn fetch(&mut self, ctx: &RequestContext) -> FetchResult<PingSnapshot> {
        let start = Instant::now();
        self.gateway.get_slot(ctx).await?;
        let elapsed = start.elapsed();

        Ok(PingSnapshot {
            response_time: elapsed.as_millis() as u64,
            timestamp: Utc::now(),
        })
    }
}
