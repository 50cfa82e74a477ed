/// API response type definitions
///
/// Envelopes and the small bodies of the non-metric endpoints
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::metrics::MetricKind;
use crate::poller::PollerStatus;

// ================================================================================================
// Envelopes
// ================================================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiErrorResponse {
    pub success: bool,
    pub error: String,
    pub timestamp: DateTime<Utc>,
}

impl ApiErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            success: false,
            error: message.to_string(),
            timestamp: Utc::now(),
        }
    }
}

// ================================================================================================
// Bodies
// ================================================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsStatusResponse {
    pub rpc_endpoint: String,
    pub metrics: Vec<PollerStatus>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RefreshResponse {
    pub requested: Vec<MetricKind>,
}
