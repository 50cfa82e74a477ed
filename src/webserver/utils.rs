/// Response helpers shared by all routes
///
/// Every response is marked uncacheable; the dashboard polls these endpoints
/// and must never be handed an intermediary's copy.
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::webserver::models::responses::{ApiErrorResponse, ApiResponse};

pub const NO_STORE: &str = "no-store, no-cache, must-revalidate, proxy-revalidate, max-age=0";

/// Wrap data in `{success: true, data}` with a 200 status
pub fn success_response<T: Serialize>(data: T) -> Response {
    with_no_store(
        (
            StatusCode::OK,
            Json(ApiResponse {
                success: true,
                data,
            }),
        )
            .into_response(),
    )
}

/// `{success: false, error, timestamp}` with the given status
pub fn error_response(status: StatusCode, message: &str) -> Response {
    with_no_store((status, Json(ApiErrorResponse::new(message))).into_response())
}

pub fn with_no_store(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static(NO_STORE));
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(header::EXPIRES, HeaderValue::from_static("0"));
    response
}
