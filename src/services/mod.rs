mod health;
pub mod implementations;

pub use health::ServiceHealth;

use crate::config::Config;
use crate::logger::{self, LogTag};
use crate::shutdown::Shutdown;
use async_trait::async_trait;
use futures::future::join_all;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// How long `stop_all` waits for each task before giving up on it
const STOP_TIMEOUT: Duration = Duration::from_secs(5);

/// Core service trait that all services must implement
#[async_trait]
pub trait Service: Send + Sync {
    /// Unique service identifier
    fn name(&self) -> &'static str;

    /// Service priority (lower = starts earlier, stops later)
    fn priority(&self) -> i32 {
        100
    }

    /// Services this service depends on
    fn dependencies(&self) -> Vec<&'static str> {
        vec![]
    }

    fn is_enabled(&self, _config: &Config) -> bool {
        true
    }

    async fn initialize(&mut self) -> Result<(), String> {
        Ok(())
    }

    /// Start the service and hand back the tasks it spawned
    async fn start(&mut self, shutdown: Arc<Shutdown>) -> Result<Vec<JoinHandle<()>>, String>;

    async fn stop(&mut self) -> Result<(), String> {
        Ok(())
    }

    async fn health(&self) -> ServiceHealth {
        ServiceHealth::Healthy
    }
}

pub struct ServiceManager {
    services: HashMap<&'static str, Box<dyn Service>>,
    handles: HashMap<&'static str, Vec<JoinHandle<()>>>,
    shutdown: Arc<Shutdown>,
    config: Config,
}

impl ServiceManager {
    pub fn new(config: Config) -> Self {
        Self {
            services: HashMap::new(),
            handles: HashMap::new(),
            shutdown: Arc::new(Shutdown::new()),
            config,
        }
    }

    /// Shared signal handed to every started service
    pub fn shutdown_signal(&self) -> Arc<Shutdown> {
        self.shutdown.clone()
    }

    pub fn register(&mut self, service: Box<dyn Service>) {
        let name = service.name();
        self.services.insert(name, service);
    }

    /// Start all enabled services in dependency and priority order
    pub async fn start_all(&mut self) -> Result<(), String> {
        let enabled: Vec<&'static str> = self
            .services
            .iter()
            .filter(|(_, service)| service.is_enabled(&self.config))
            .map(|(name, _)| *name)
            .collect();

        let ordered = self.resolve_startup_order(&enabled)?;
        logger::debug(
            LogTag::System,
            &format!("Service startup order: {:?}", ordered),
        );

        for name in ordered {
            if let Some(service) = self.services.get_mut(name) {
                service
                    .initialize()
                    .await
                    .map_err(|e| format!("Failed to initialize {}: {}", name, e))?;

                let handles = service
                    .start(self.shutdown.clone())
                    .await
                    .map_err(|e| format!("Failed to start {}: {}", name, e))?;
                self.handles.insert(name, handles);

                logger::info(LogTag::System, &format!("Service started: {}", name));
            }
        }

        Ok(())
    }

    /// Signal shutdown and stop services in reverse startup order
    pub async fn stop_all(&mut self) -> Result<(), String> {
        self.shutdown.trigger();

        let running: Vec<&'static str> = self.handles.keys().copied().collect();
        let mut ordered = self.resolve_startup_order(&running)?;
        ordered.reverse();

        for name in ordered {
            if let Some(service) = self.services.get_mut(name) {
                if let Err(e) = service.stop().await {
                    logger::warning(
                        LogTag::System,
                        &format!("Service stop error for {}: {}", name, e),
                    );
                }

                if let Some(handles) = self.handles.remove(name) {
                    let count = handles.len();
                    if tokio::time::timeout(STOP_TIMEOUT, join_all(handles)).await.is_err() {
                        logger::warning(
                            LogTag::System,
                            &format!(
                                "{} tasks of {} did not stop within {:?}",
                                count, name, STOP_TIMEOUT
                            ),
                        );
                    }
                }

                logger::info(LogTag::System, &format!("Service stopped: {}", name));
            }
        }

        Ok(())
    }

    /// Dependencies first, then by priority among independent services
    fn resolve_startup_order(&self, names: &[&'static str]) -> Result<Vec<&'static str>, String> {
        fn visit(
            name: &'static str,
            services: &HashMap<&'static str, Box<dyn Service>>,
            ordered: &mut Vec<&'static str>,
            visited: &mut HashSet<&'static str>,
            visiting: &mut HashSet<&'static str>,
        ) -> Result<(), String> {
            if visited.contains(name) {
                return Ok(());
            }
            if !visiting.insert(name) {
                return Err(format!("Circular dependency detected for service: {}", name));
            }

            let service = services
                .get(name)
                .ok_or_else(|| format!("Unknown service dependency: {}", name))?;

            let mut deps = service.dependencies();
            deps.sort_by_key(|d| services.get(d).map(|s| s.priority()).unwrap_or(100));
            for dep in deps {
                visit(dep, services, ordered, visited, visiting)?;
            }

            visiting.remove(name);
            visited.insert(name);
            ordered.push(name);
            Ok(())
        }

        let mut roots = names.to_vec();
        roots.sort_by_key(|name| {
            (
                self.services.get(name).map(|s| s.priority()).unwrap_or(100),
                *name,
            )
        });

        let mut ordered = Vec::new();
        let mut visited = HashSet::new();
        let mut visiting = HashSet::new();
        for name in roots {
            visit(name, &self.services, &mut ordered, &mut visited, &mut visiting)?;
        }

        Ok(ordered)
    }

    pub async fn get_health(&self) -> HashMap<&'static str, ServiceHealth> {
        let mut health = HashMap::new();
        for (name, service) in &self.services {
            health.insert(*name, service.health().await);
        }
        health
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    struct Recorder {
        name: &'static str,
        priority: i32,
        deps: Vec<&'static str>,
        log: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl Service for Recorder {
        fn name(&self) -> &'static str {
            self.name
        }

        fn priority(&self) -> i32 {
            self.priority
        }

        fn dependencies(&self) -> Vec<&'static str> {
            self.deps.clone()
        }

        async fn start(&mut self, shutdown: Arc<Shutdown>) -> Result<Vec<JoinHandle<()>>, String> {
            self.log.lock().push(format!("start {}", self.name));
            let handle = tokio::spawn(async move { shutdown.wait().await });
            Ok(vec![handle])
        }

        async fn stop(&mut self) -> Result<(), String> {
            self.log.lock().push(format!("stop {}", self.name));
            Ok(())
        }
    }

    fn recorder(
        name: &'static str,
        priority: i32,
        deps: Vec<&'static str>,
        log: &Arc<Mutex<Vec<String>>>,
    ) -> Box<dyn Service> {
        Box::new(Recorder {
            name,
            priority,
            deps,
            log: log.clone(),
        })
    }

    #[tokio::test]
    async fn test_dependencies_start_first_and_stop_last() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut manager = ServiceManager::new(Config::default());
        manager.register(recorder("webserver", 10, vec!["metrics"], &log));
        manager.register(recorder("metrics", 50, vec![], &log));

        manager.start_all().await.unwrap();
        manager.stop_all().await.unwrap();

        assert_eq!(
            *log.lock(),
            vec![
                "start metrics",
                "start webserver",
                "stop webserver",
                "stop metrics"
            ]
        );
        assert!(manager.shutdown_signal().is_triggered());
    }

    #[tokio::test]
    async fn test_circular_dependency_is_rejected() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut manager = ServiceManager::new(Config::default());
        manager.register(recorder("a", 1, vec!["b"], &log));
        manager.register(recorder("b", 1, vec!["a"], &log));

        let err = manager.start_all().await.unwrap_err();
        assert!(err.contains("Circular dependency"));
        assert!(log.lock().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_dependency_is_rejected() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut manager = ServiceManager::new(Config::default());
        manager.register(recorder("a", 1, vec!["ghost"], &log));
        assert!(manager.start_all().await.is_err());
    }
}
