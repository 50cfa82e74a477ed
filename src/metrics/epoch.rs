use super::{EpochSnapshot, MetricFetcher, MetricKind, RequestContext};
use crate::errors::FetchResult;
use crate::rpc::{RpcGateway, RpcMethods};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

/// Percent of the epoch elapsed, clamped to [0, 100]
pub fn compute_epoch_progress(slot_index: u64, slots_in_epoch: u64) -> f64 {
    if slots_in_epoch == 0 {
        return 0.0;
    }
    (slot_index as f64 / slots_in_epoch as f64 * 100.0).clamp(0.0, 100.0)
}

/// Milliseconds left in the epoch at the expected slot duration
pub fn compute_time_remaining(slot_index: u64, slots_in_epoch: u64, slot_duration_ms: u64) -> u64 {
    slots_in_epoch
        .saturating_sub(slot_index)
        .saturating_mul(slot_duration_ms)
}

pub struct EpochFetcher {
    gateway: Arc<dyn RpcGateway>,
    slot_duration_ms: u64,
}

impl EpochFetcher {
    pub fn new(gateway: Arc<dyn RpcGateway>, slot_duration_ms: u64) -> Self {
        Self {
            gateway,
            slot_duration_ms,
        }
    }
}

#[async_trait]
impl MetricFetcher for EpochFetcher {
    type Output = EpochSnapshot;

    fn kind(&self) -> MetricKind {
        MetricKind::Epoch
    }

    async fn fetch(&mut self, ctx: &RequestContext) -> FetchResult<EpochSnapshot> {
        let info = self.gateway.get_epoch_info(ctx).await?;

        Ok(EpochSnapshot {
            epoch: info.epoch,
            slot_index: info.slot_index,
            slots_in_epoch: info.slots_in_epoch,
            absolute_slot: info.absolute_slot,
            block_height: info.block_height,
            transaction_count: info.transaction_count.unwrap_or(0),
            epoch_progress: compute_epoch_progress(info.slot_index, info.slots_in_epoch),
            time_remaining: compute_time_remaining(
                info.slot_index,
                info.slots_in_epoch,
                self.slot_duration_ms,
            ),
            timestamp: Utc::now(),
        })
    }
}
