//! Metric fetchers
//!
//! One fetcher per `MetricKind`. A fetcher performs exactly one logical
//! upstream read per call, normalizes it into a snapshot and never retries;
//! scheduling and caching belong to the poller.

mod context;
mod epoch;
mod gas;
mod kind;
mod ping;
mod rate;
mod staking;
mod supply;
mod transactions;
mod types;
mod units;
mod validators;

pub use context::RequestContext;
pub use epoch::{compute_epoch_progress, compute_time_remaining, EpochFetcher};
pub use gas::GasFetcher;
pub use kind::MetricKind;
pub use ping::PingFetcher;
pub use rate::RateEstimator;
pub use staking::StakingFetcher;
pub use supply::SupplyFetcher;
pub use transactions::TransactionsFetcher;
pub use types::*;
pub use units::{lamports_to_units, round2, LAMPORTS_PER_UNIT};
pub use validators::{compute_validator_stats, ValidatorsFetcher};

use crate::errors::FetchResult;
use async_trait::async_trait;

/// One upstream read normalized into a snapshot
///
/// `fetch` takes `&mut self` so stateful fetchers (transactions) can keep
/// their history without locking; each fetcher is owned by exactly one poller.
#[async_trait]
pub trait MetricFetcher: Send + 'static {
    type Output: Send + Sync + 'static;

    fn kind(&self) -> MetricKind;

    async fn fetch(&mut self, ctx: &RequestContext) -> FetchResult<Self::Output>;
}
