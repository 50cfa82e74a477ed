/// Axum webserver implementation
///
/// Binding is split from serving so bind failures surface during service
/// startup instead of inside a background task.
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use crate::{
    config::WebserverConfig,
    errors::AppError,
    logger::{self, LogTag},
    shutdown::Shutdown,
    webserver::{routes, state::AppState},
};

/// Bind the configured address
pub async fn bind(config: &WebserverConfig) -> Result<TcpListener, AppError> {
    let addr = format!("{}:{}", config.host, config.port);
    let parsed: SocketAddr = addr.parse().map_err(|e| AppError::Bind {
        addr: addr.clone(),
        reason: format!("Invalid bind address: {}", e),
    })?;

    TcpListener::bind(parsed).await.map_err(|e| {
        let reason = match e.kind() {
            std::io::ErrorKind::AddrInUse => {
                "Address already in use (is another instance running?)".to_string()
            }
            std::io::ErrorKind::PermissionDenied => format!(
                "Permission denied; port {} may require elevated privileges",
                config.port
            ),
            _ => e.to_string(),
        };
        AppError::Bind { addr, reason }
    })
}

/// Serve until the shutdown signal fires
pub async fn serve(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: Arc<Shutdown>,
) -> Result<(), String> {
    let addr = listener
        .local_addr()
        .map(|a| a.to_string())
        .unwrap_or_else(|_| "unknown".to_string());
    logger::info(
        LogTag::Webserver,
        &format!("Webserver listening on http://{}", addr),
    );

    let app = build_app(state);

    let shutdown_signal = async move {
        shutdown.wait().await;
        logger::debug(
            LogTag::Webserver,
            "Received shutdown signal, stopping webserver...",
        );
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|e| format!("Server error: {}", e))?;

    logger::debug(LogTag::Webserver, "Webserver stopped gracefully");
    Ok(())
}

/// Build the Axum application with all routes and middleware
pub fn build_app(state: Arc<AppState>) -> Router {
    let permissive = state.config.cors_permissive;
    let app = routes::create_router(state);

    if permissive {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}
