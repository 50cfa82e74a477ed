//! Snapshot value objects served by the HTTP surface
//!
//! Amounts are in display units unless the field name says otherwise.

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplySnapshot {
    pub total: f64,
    pub circulating: f64,
    pub non_circulating: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EpochSnapshot {
    pub epoch: u64,
    pub slot_index: u64,
    pub slots_in_epoch: u64,
    pub absolute_slot: u64,
    pub block_height: u64,
    pub transaction_count: u64,
    /// Percent of the epoch elapsed, 0 to 100
    pub epoch_progress: f64,
    /// Estimated milliseconds until the epoch ends
    pub time_remaining: u64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSnapshot {
    pub total_transactions: u64,
    pub transactions_per_second: u64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StakingSnapshot {
    pub total_staked: f64,
    pub active_stake: f64,
    pub inactive_stake: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatorRecord {
    /// Node identity pubkey
    pub identity: String,
    pub vote_account: String,
    /// None when the node did not report one
    pub commission: Option<i64>,
    pub last_vote: u64,
    /// Credits earned in the latest epoch
    pub credits: u64,
    /// Cumulative credits
    pub total_credits: u64,
    pub potential_airdrop: f64,
    pub activated_stake: f64,
    pub delinquent: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatorStats {
    pub total: usize,
    pub average: f64,
    pub min: f64,
    pub max: f64,
    pub total_credits: u64,
    pub total_potential_airdrop: f64,
    pub total_genesis_airdrop: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatorsSnapshot {
    pub validators: Vec<ValidatorRecord>,
    pub stats: ValidatorStats,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PingSnapshot {
    /// Milliseconds for one round trip
    pub response_time: u64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GasSnapshot {
    pub normal: f64,
    pub fast: f64,
    pub timestamp: DateTime<Utc>,
}
