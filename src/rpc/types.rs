//! RPC error type and upstream response shapes
//!
//! Response structs are lenient: a field that is absent, `null` or of the
//! wrong type decodes to its zero value, and a malformed vote account entry
//! is dropped instead of failing the whole list.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RpcError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timeout")]
    Timeout,

    #[error("HTTP status {status}")]
    HttpStatus { status: u16 },

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

pub type RpcResult<T> = Result<T, RpcError>;

// =============================================================================
// LENIENT DECODING
// =============================================================================

/// Decode a field, falling back to its default on `null` or a mistyped value
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(raw).unwrap_or_default())
}

/// Decode a list entry by entry, skipping entries that do not decode
fn lenient_entries<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect()),
        _ => Ok(Vec::new()),
    }
}

/// `[[epoch, credits, previousCredits], ...]` with bad cells read as 0
fn lenient_credits<'de, D>(deserializer: D) -> Result<Vec<Vec<u64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let rows = match Value::deserialize(deserializer)? {
        Value::Array(rows) => rows,
        _ => return Ok(Vec::new()),
    };

    Ok(rows
        .into_iter()
        .filter_map(|row| match row {
            Value::Array(cells) => Some(cells.iter().map(|c| c.as_u64().unwrap_or(0)).collect()),
            _ => None,
        })
        .collect())
}

// =============================================================================
// getSupply
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RpcSupplyValue {
    #[serde(deserialize_with = "lenient")]
    pub total: u64,
    #[serde(deserialize_with = "lenient")]
    pub circulating: u64,
    #[serde(deserialize_with = "lenient")]
    pub non_circulating: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RpcSupply {
    #[serde(deserialize_with = "lenient")]
    pub value: RpcSupplyValue,
}

// =============================================================================
// getEpochInfo
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RpcEpochInfo {
    #[serde(deserialize_with = "lenient")]
    pub epoch: u64,
    #[serde(deserialize_with = "lenient")]
    pub slot_index: u64,
    #[serde(deserialize_with = "lenient")]
    pub slots_in_epoch: u64,
    #[serde(deserialize_with = "lenient")]
    pub absolute_slot: u64,
    #[serde(deserialize_with = "lenient")]
    pub block_height: u64,
    /// Not every node reports it
    #[serde(deserialize_with = "lenient")]
    pub transaction_count: Option<u64>,
}

// =============================================================================
// getVoteAccounts
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RpcVoteAccount {
    #[serde(deserialize_with = "lenient")]
    pub vote_pubkey: String,
    #[serde(deserialize_with = "lenient")]
    pub node_pubkey: String,
    #[serde(deserialize_with = "lenient")]
    pub activated_stake: u64,
    #[serde(deserialize_with = "lenient")]
    pub commission: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub last_vote: u64,
    /// `[epoch, creditsInEpoch, cumulativeCredits]`, oldest first
    #[serde(deserialize_with = "lenient_credits")]
    pub epoch_credits: Vec<Vec<u64>>,
}

impl RpcVoteAccount {
    /// Credits earned in the most recent epoch and the cumulative total
    pub fn latest_credits(&self) -> (u64, u64) {
        match self.epoch_credits.last() {
            Some(entry) => (
                entry.get(1).copied().unwrap_or(0),
                entry.get(2).copied().unwrap_or(0),
            ),
            None => (0, 0),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RpcVoteAccounts {
    #[serde(deserialize_with = "lenient_entries")]
    pub current: Vec<RpcVoteAccount>,
    #[serde(deserialize_with = "lenient_entries")]
    pub delinquent: Vec<RpcVoteAccount>,
}

// =============================================================================
// getLatestBlockhash
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RpcBlockhashValue {
    #[serde(deserialize_with = "lenient")]
    pub blockhash: String,
    #[serde(deserialize_with = "lenient")]
    pub last_valid_block_height: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RpcLatestBlockhash {
    #[serde(deserialize_with = "lenient")]
    pub value: RpcBlockhashValue,
}
