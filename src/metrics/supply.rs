use super::{lamports_to_units, MetricFetcher, MetricKind, RequestContext, SupplySnapshot};
use crate::errors::FetchResult;
use crate::rpc::{RpcGateway, RpcMethods};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

pub struct SupplyFetcher {
    gateway: Arc<dyn RpcGateway>,
}

impl SupplyFetcher {
    pub fn new(gateway: Arc<dyn RpcGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl MetricFetcher for SupplyFetcher {
    type Output = SupplySnapshot;

    fn kind(&self) -> MetricKind {
        MetricKind::Supply
    }

    async fn fetch(&mut self, ctx: &RequestContext) -> FetchResult<SupplySnapshot> {
        let supply = self.gateway.get_supply(ctx).await?;

        Ok(SupplySnapshot {
            total: lamports_to_units(supply.value.total),
            circulating: lamports_to_units(supply.value.circulating),
            non_circulating: lamports_to_units(supply.value.non_circulating),
            timestamp: Utc::now(),
        })
    }
}
