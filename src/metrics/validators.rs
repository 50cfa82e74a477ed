use super::{
    lamports_to_units, round2, MetricFetcher, MetricKind, RequestContext, ValidatorRecord,
    ValidatorStats, ValidatorsSnapshot,
};
use crate::errors::FetchResult;
use crate::rpc::{RpcGateway, RpcMethods, RpcVoteAccount};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

/// Aggregate figures over a validator list
///
/// Commission average/min/max only consider validators that reported a
/// commission of at least 0. Every fractional output is rounded to two
/// decimals. An empty list (or one with no usable commission) yields zeros.
pub fn compute_validator_stats(validators: &[ValidatorRecord], genesis_share: f64) -> ValidatorStats {
    let commissions: Vec<f64> = validators
        .iter()
        .filter_map(|v| v.commission)
        .filter(|c| *c >= 0)
        .map(|c| c as f64)
        .collect();

    let (average, min, max) = if commissions.is_empty() {
        (0.0, 0.0, 0.0)
    } else {
        let sum: f64 = commissions.iter().sum();
        let min = commissions.iter().copied().fold(f64::INFINITY, f64::min);
        let max = commissions.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        (sum / commissions.len() as f64, min, max)
    };

    let total_credits = validators
        .iter()
        .fold(0u64, |acc, v| acc.saturating_add(v.total_credits));
    let total_potential_airdrop: f64 = validators.iter().map(|v| v.potential_airdrop).sum();

    ValidatorStats {
        total: validators.len(),
        average: round2(average),
        min: round2(min),
        max: round2(max),
        total_credits,
        total_potential_airdrop: round2(total_potential_airdrop),
        total_genesis_airdrop: round2(total_potential_airdrop * genesis_share),
    }
}

pub struct ValidatorsFetcher {
    gateway: Arc<dyn RpcGateway>,
    credits_per_unit: u64,
    genesis_share: f64,
}

impl ValidatorsFetcher {
    pub fn new(gateway: Arc<dyn RpcGateway>, credits_per_unit: u64, genesis_share: f64) -> Self {
        Self {
            gateway,
            credits_per_unit,
            genesis_share,
        }
    }

    fn to_record(&self, account: &RpcVoteAccount, delinquent: bool) -> ValidatorRecord {
        let (credits, total_credits) = account.latest_credits();
        let potential_airdrop = if self.credits_per_unit == 0 {
            0.0
        } else {
            total_credits as f64 / self.credits_per_unit as f64
        };

        ValidatorRecord {
            identity: account.node_pubkey.clone(),
            vote_account: account.vote_pubkey.clone(),
            commission: account.commission,
            last_vote: account.last_vote,
            credits,
            total_credits,
            potential_airdrop,
            activated_stake: lamports_to_units(account.activated_stake),
            delinquent,
        }
    }
}

#[async_trait]
impl MetricFetcher for ValidatorsFetcher {
    type Output = ValidatorsSnapshot;

    fn kind(&self) -> MetricKind {
        MetricKind::Validators
    }

    async fn fetch(&mut self, ctx: &RequestContext) -> FetchResult<ValidatorsSnapshot> {
        let accounts = self.gateway.get_vote_accounts(ctx).await?;

        let validators: Vec<ValidatorRecord> = accounts
            .current
            .iter()
            .map(|a| self.to_record(a, false))
            .chain(accounts.delinquent.iter().map(|a| self.to_record(a, true)))
            .collect();

        let stats = compute_validator_stats(&validators, self.genesis_share);

        Ok(ValidatorsSnapshot {
            validators,
            stats,
            timestamp: Utc::now(),
        })
    }
}
