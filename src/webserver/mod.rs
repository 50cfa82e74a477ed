//! HTTP surface consumed by the dashboard
//!
//! - `GET /metrics/{supply,epoch,transactions,staking,validators,ping,gas}`
//! - `GET /metrics/status`, `POST /metrics/refresh`, `POST /metrics/focus`
//! - `GET /health`

pub mod models;
pub mod routes;
pub mod server;
pub mod state;
pub mod utils;

pub use server::{bind, build_app, serve};
pub use state::AppState;
