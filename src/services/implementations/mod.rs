mod metrics_service;
mod webserver_service;

pub use metrics_service::{HubSlot, MetricsService};
pub use webserver_service::WebserverService;
