use crate::config::WebserverConfig;
use crate::logger::{self, LogTag};
use crate::services::implementations::HubSlot;
use crate::services::Service;
use crate::shutdown::Shutdown;
use crate::webserver::{self, AppState};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::task::JoinHandle;

pub struct WebserverService {
    config: WebserverConfig,
    slot: HubSlot,
    rpc_endpoint: String,
}

impl WebserverService {
    pub fn new(config: WebserverConfig, slot: HubSlot, rpc_endpoint: String) -> Self {
        Self {
            config,
            slot,
            rpc_endpoint,
        }
    }
}

#[async_trait]
impl Service for WebserverService {
    fn name(&self) -> &'static str {
        "webserver"
    }

    fn priority(&self) -> i32 {
        30
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec!["metrics"]
    }

    async fn start(&mut self, shutdown: Arc<Shutdown>) -> Result<Vec<JoinHandle<()>>, String> {
        let hub = self
            .slot
            .get()
            .cloned()
            .ok_or_else(|| "Metrics hub is not running".to_string())?;

        // bind here so an occupied port fails startup instead of a background task
        let listener = webserver::bind(&self.config)
            .await
            .map_err(|e| e.to_string())?;

        let state = Arc::new(AppState::new(
            self.config.clone(),
            hub,
            self.rpc_endpoint.clone(),
        ));

        let handle = tokio::spawn(async move {
            if let Err(e) = webserver::serve(listener, state, shutdown).await {
                logger::error(LogTag::Webserver, &format!("Webserver failed: {}", e));
            }
        });

        Ok(vec![handle])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::OnceCell;

    #[tokio::test]
    async fn test_start_requires_metrics_hub() {
        let slot: HubSlot = Arc::new(OnceCell::new());
        let mut service = WebserverService::new(
            WebserverConfig {
                port: 0,
                ..WebserverConfig::default()
            },
            slot,
            "http://localhost:8899".to_string(),
        );
        let err = service
            .start(Arc::new(Shutdown::new()))
            .await
            .unwrap_err();
        assert!(err.contains("not running"));
    }
}
