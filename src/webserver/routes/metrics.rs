use axum::{
    extract::State,
    http::StatusCode,
    response::Response,
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use crate::{
    logger::{self, LogTag},
    metrics::MetricKind,
    poller::{PollerHandle, PollerState},
    webserver::{
        models::responses::{MetricsStatusResponse, RefreshResponse},
        state::AppState,
        utils::{error_response, success_response},
    },
};

/// Create metric routes (mounted under /metrics)
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/supply", get(supply))
        .route("/epoch", get(epoch))
        .route("/transactions", get(transactions))
        .route("/staking", get(staking))
        .route("/validators", get(validators))
        .route("/ping", get(ping))
        .route("/gas", get(gas))
        .route("/status", get(status))
        .route("/refresh", post(refresh))
        .route("/focus", post(focus))
}

/// GET /metrics/supply
async fn supply(State(state): State<Arc<AppState>>) -> Response {
    serve_metric(&state.hub.supply, state.request_timeout()).await
}

/// GET /metrics/epoch
async fn epoch(State(state): State<Arc<AppState>>) -> Response {
    serve_metric(&state.hub.epoch, state.request_timeout()).await
}

/// GET /metrics/transactions
async fn transactions(State(state): State<Arc<AppState>>) -> Response {
    serve_metric(&state.hub.transactions, state.request_timeout()).await
}

/// GET /metrics/staking
async fn staking(State(state): State<Arc<AppState>>) -> Response {
    serve_metric(&state.hub.staking, state.request_timeout()).await
}

/// GET /metrics/validators
async fn validators(State(state): State<Arc<AppState>>) -> Response {
    serve_metric(&state.hub.validators, state.request_timeout()).await
}

/// GET /metrics/ping
async fn ping(State(state): State<Arc<AppState>>) -> Response {
    serve_metric(&state.hub.ping, state.request_timeout()).await
}

/// GET /metrics/gas
async fn gas(State(state): State<Arc<AppState>>) -> Response {
    serve_metric(&state.hub.gas, state.request_timeout()).await
}

/// GET /metrics/status
async fn status(State(state): State<Arc<AppState>>) -> Response {
    success_response(MetricsStatusResponse {
        rpc_endpoint: state.rpc_endpoint.clone(),
        metrics: state.hub.statuses(),
        timestamp: Utc::now(),
    })
}

/// POST /metrics/refresh
async fn refresh(State(state): State<Arc<AppState>>) -> Response {
    let requested = state.hub.refresh_all();
    logger::debug(
        LogTag::Webserver,
        &format!("Manual refresh requested for {} metrics", requested.len()),
    );
    success_response(RefreshResponse { requested })
}

/// POST /metrics/focus
async fn focus(State(state): State<Arc<AppState>>) -> Response {
    state.hub.focus_regained_all();
    success_response(serde_json::json!({ "acknowledged": true }))
}

/// Serve the cached value, or wait for the first outcome if there is none
///
/// A stale value is still a value: it is served even when the latest fetch
/// failed. Only a metric with an error and no value answers 500.
async fn serve_metric<T>(handle: &PollerHandle<T>, timeout: Duration) -> Response
where
    T: Serialize + Send + Sync + 'static,
{
    let kind = handle.kind();

    if !handle.is_enabled() {
        return error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            &format!("Metric {} is disabled", kind),
        );
    }

    if let Some(response) = respond_from_state(kind, &handle.current()) {
        return response;
    }

    // nothing yet: join (or start) the first fetch
    handle.refresh();
    match handle.wait_for_outcome(timeout).await {
        Some(state) => respond_from_state(kind, &state)
            .unwrap_or_else(|| error_response(StatusCode::INTERNAL_SERVER_ERROR, kind.failure_message())),
        None => {
            logger::warning(
                LogTag::Webserver,
                &format!("{} had no outcome within {}ms", kind, timeout.as_millis()),
            );
            error_response(StatusCode::INTERNAL_SERVER_ERROR, kind.failure_message())
        }
    }
}

fn respond_from_state<T: Serialize>(kind: MetricKind, state: &PollerState<T>) -> Option<Response> {
    if let Some(value) = &state.last_value {
        return Some(success_response(value.as_ref()));
    }

    if let Some(error) = &state.last_error {
        logger::debug(
            LogTag::Webserver,
            &format!("Serving {} failure: {}", kind, error),
        );
        return Some(error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            kind.failure_message(),
        ));
    }

    None
}
