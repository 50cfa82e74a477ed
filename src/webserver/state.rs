/// Shared application state for the webserver
///
/// Route handlers read metric state through the hub's poller handles; they
/// never call the RPC gateway themselves.
use crate::config::WebserverConfig;
use crate::poller::MetricsHub;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    /// Webserver configuration
    pub config: Arc<WebserverConfig>,

    pub hub: MetricsHub,

    /// Upstream endpoint, reported by the status route
    pub rpc_endpoint: String,

    /// Server startup time
    pub startup_time: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    pub fn new(config: WebserverConfig, hub: MetricsHub, rpc_endpoint: String) -> Self {
        Self {
            config: Arc::new(config),
            hub,
            rpc_endpoint,
            startup_time: chrono::Utc::now(),
        }
    }

    /// How long a request waits for a metric's first outcome
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.config.request_timeout_ms)
    }

    pub fn uptime_seconds(&self) -> u64 {
        (chrono::Utc::now() - self.startup_time).num_seconds().max(0) as u64
    }
}
