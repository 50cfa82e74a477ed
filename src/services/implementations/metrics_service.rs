use crate::config::Config;
use crate::logger::{self, LogTag};
use crate::poller::MetricsHub;
use crate::rpc::RpcGateway;
use crate::services::{Service, ServiceHealth};
use crate::shutdown::Shutdown;
use async_trait::async_trait;
use once_cell::sync::OnceCell;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Where the metrics service publishes its hub for later services
pub type HubSlot = Arc<OnceCell<MetricsHub>>;

/// Runs one poller per metric against the configured gateway
pub struct MetricsService {
    gateway: Arc<dyn RpcGateway>,
    config: Config,
    slot: HubSlot,
}

impl MetricsService {
    pub fn new(gateway: Arc<dyn RpcGateway>, config: Config, slot: HubSlot) -> Self {
        Self {
            gateway,
            config,
            slot,
        }
    }
}

#[async_trait]
impl Service for MetricsService {
    fn name(&self) -> &'static str {
        "metrics"
    }

    fn priority(&self) -> i32 {
        20
    }

    async fn start(&mut self, shutdown: Arc<Shutdown>) -> Result<Vec<JoinHandle<()>>, String> {
        if self.slot.get().is_some() {
            return Err("Metrics hub already started".to_string());
        }

        logger::info(
            LogTag::Metrics,
            &format!("Polling RPC endpoint {}", self.gateway.endpoint()),
        );

        let (hub, tasks) = MetricsHub::spawn(self.gateway.clone(), &self.config, shutdown);
        self.slot
            .set(hub)
            .map_err(|_| "Metrics hub already started".to_string())?;

        Ok(tasks)
    }

    async fn health(&self) -> ServiceHealth {
        let Some(hub) = self.slot.get() else {
            return ServiceHealth::Starting;
        };

        let statuses: Vec<_> = hub.statuses().into_iter().filter(|s| s.enabled).collect();
        let failing: Vec<String> = statuses
            .iter()
            .filter(|s| s.last_error.is_some())
            .map(|s| s.kind.to_string())
            .collect();

        if failing.is_empty() {
            ServiceHealth::Healthy
        } else if failing.len() == statuses.len() && statuses.iter().all(|s| !s.has_value) {
            ServiceHealth::Unhealthy("no metric could be fetched".to_string())
        } else {
            ServiceHealth::Degraded(format!("failing: {}", failing.join(", ")))
        }
    }
}
