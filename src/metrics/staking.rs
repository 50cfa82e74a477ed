use super::{lamports_to_units, MetricFetcher, MetricKind, RequestContext, StakingSnapshot};
use crate::errors::FetchResult;
use crate::rpc::{RpcGateway, RpcMethods, RpcVoteAccount};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

/// Stake totals from the vote account sets
///
/// Current validators count as active stake, delinquent ones as inactive.
pub struct StakingFetcher {
    gateway: Arc<dyn RpcGateway>,
}

impl StakingFetcher {
    pub fn new(gateway: Arc<dyn RpcGateway>) -> Self {
        Self { gateway }
    }
}

fn sum_stake(accounts: &[RpcVoteAccount]) -> u64 {
    accounts
        .iter()
        .fold(0u64, |acc, a| acc.saturating_add(a.activated_stake))
}

#[async_trait]
impl MetricFetcher for StakingFetcher {
    type Output = StakingSnapshot;

    fn kind(&self) -> MetricKind {
        MetricKind::Staking
    }

    async fn fetch(&mut self, ctx: &RequestContext) -> FetchResult<StakingSnapshot> {
        let accounts = self.gateway.get_vote_accounts(ctx).await?;

        let active_stake = lamports_to_units(sum_stake(&accounts.current));
        let inactive_stake = lamports_to_units(sum_stake(&accounts.delinquent));

        Ok(StakingSnapshot {
            total_staked: active_stake + inactive_stake,
            active_stake,
            inactive_stake,
            timestamp: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::testing::ScriptedGateway;
    use crate::rpc::GET_VOTE_ACCOUNTS;
    use serde_json::json;

    #[tokio::test]
    async fn test_total_is_active_plus_inactive() {
        let gateway = ScriptedGateway::new().respond(
            GET_VOTE_ACCOUNTS,
            json!({
                "current": [
                    { "activatedStake": 2_000_000_000u64 },
                    { "activatedStake": 3_000_000_000u64 }
                ],
                "delinquent": [
                    { "activatedStake": 1_000_000_000u64 }
                ]
            }),
        );
        let mut fetcher = StakingFetcher::new(Arc::new(gateway));
        let snapshot = fetcher
            .fetch(&RequestContext::new(MetricKind::Staking))
            .await
            .unwrap();

        assert_eq!(snapshot.active_stake, 5.0);
        assert_eq!(snapshot.inactive_stake, 1.0);
        assert_eq!(snapshot.total_staked, 6.0);
        assert_eq!(
            snapshot.total_staked,
            snapshot.active_stake + snapshot.inactive_stake
        );
    }

    #[tokio::test]
    async fn test_null_stake_and_bad_entry_do_not_fail_the_fetch() {
        let gateway = ScriptedGateway::new().respond(
            GET_VOTE_ACCOUNTS,
            json!({
                "current": [
                    { "activatedStake": 2_000_000_000u64, "lastVote": null },
                    { "activatedStake": null },
                    "not an account"
                ],
                "delinquent": [
                    { "activatedStake": 1_000_000_000u64, "commission": null }
                ]
            }),
        );
        let mut fetcher = StakingFetcher::new(Arc::new(gateway));
        let snapshot = fetcher
            .fetch(&RequestContext::new(MetricKind::Staking))
            .await
            .unwrap();

        assert_eq!(snapshot.active_stake, 2.0);
        assert_eq!(snapshot.inactive_stake, 1.0);
        assert_eq!(snapshot.total_staked, 3.0);
    }

    #[tokio::test]
    async fn test_empty_sets_are_zero() {
        let gateway = ScriptedGateway::new().respond(GET_VOTE_ACCOUNTS, json!({}));
        let mut fetcher = StakingFetcher::new(Arc::new(gateway));
        let snapshot = fetcher
            .fetch(&RequestContext::new(MetricKind::Staking))
            .await
            .unwrap();
        assert_eq!(snapshot.total_staked, 0.0);
    }
}
