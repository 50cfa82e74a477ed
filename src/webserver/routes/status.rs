use axum::{extract::State, response::Response, routing::get, Router};
use chrono::Utc;
use std::sync::Arc;

use crate::{
    logger::{self, LogTag},
    webserver::{models::responses::HealthResponse, state::AppState, utils::success_response},
};

/// Create status routes
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health_check))
}

/// GET /health
async fn health_check(State(state): State<Arc<AppState>>) -> Response {
    logger::verbose(LogTag::Webserver, "Health check endpoint called");

    success_response(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        timestamp: Utc::now(),
    })
}
