pub mod arguments;
pub mod config;
pub mod errors;
pub mod logger;
pub mod metrics;
pub mod poller;
pub mod rpc;
pub mod run;
pub mod services;
pub mod shutdown;
pub mod webserver;
