/// Error types for the dashboard core
///
/// `FetchError` is what a metric fetcher returns to its poller. `AppError`
/// covers startup and lifecycle failures surfaced by the binary.
use crate::rpc::RpcError;
use thiserror::Error;

// =============================================================================
// FETCH ERRORS
// =============================================================================

#[derive(Error, Debug, Clone)]
pub enum FetchError {
    /// Transport failure, HTTP error status or JSON-RPC error object
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(#[from] RpcError),

    /// The RPC answered but the result cannot be interpreted at all
    ///
    /// Missing fields never end up here; they default to zero.
    #[error("Malformed response from {method}: {reason}")]
    MalformedResponse { method: String, reason: String },
}

impl FetchError {
    pub fn malformed(method: &str, reason: impl Into<String>) -> Self {
        FetchError::MalformedResponse {
            method: method.to_string(),
            reason: reason.into(),
        }
    }

    /// Short machine-friendly category for status reporting
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::UpstreamUnavailable(_) => "upstream_unavailable",
            FetchError::MalformedResponse { .. } => "malformed_response",
        }
    }
}

pub type FetchResult<T> = std::result::Result<T, FetchError>;

// =============================================================================
// APPLICATION ERRORS
// =============================================================================

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to bind {addr}: {reason}")]
    Bind { addr: String, reason: String },

    #[error("Service error: {0}")]
    Service(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Errors that should stop the process immediately
    pub fn is_critical(&self) -> bool {
        matches!(self, AppError::Config(_) | AppError::Bind { .. })
    }
}
