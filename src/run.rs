// Process lifecycle: configuration, logger, services, signal handling

use crate::{
    arguments::Args,
    config::{get_config_clone, read_config_file, set_config, to_toml_string, validate_config},
    errors::AppError,
    logger::{self, LogTag},
    rpc::{HttpRpcGateway, RpcGateway},
    services::{
        implementations::{HubSlot, MetricsService, WebserverService},
        ServiceManager,
    },
};
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// Run until Ctrl-C / SIGTERM
pub async fn run(args: Args) -> Result<(), AppError> {
    let mut config = read_config_file(&args.config).map_err(AppError::Config)?;
    args.apply_overrides(&mut config);
    validate_config(&config).map_err(AppError::Config)?;

    if args.print_config {
        println!("{}", to_toml_string(&config).map_err(AppError::Config)?);
        return Ok(());
    }

    logger::init(args.logger_config(&config));
    set_config(config).map_err(AppError::Config)?;
    let config = get_config_clone();

    logger::info(
        LogTag::System,
        &format!(
            "x1-dashboard v{} starting (rpc={}, http={}:{})",
            env!("CARGO_PKG_VERSION"),
            config.rpc.url,
            config.webserver.host,
            config.webserver.port
        ),
    );

    let gateway: Arc<dyn RpcGateway> =
        Arc::new(HttpRpcGateway::new(&config.rpc).map_err(|e| AppError::Config(e.to_string()))?);

    let slot: HubSlot = Arc::new(OnceCell::new());
    let mut manager = ServiceManager::new(config.clone());
    manager.register(Box::new(MetricsService::new(
        gateway,
        config.clone(),
        slot.clone(),
    )));
    manager.register(Box::new(WebserverService::new(
        config.webserver.clone(),
        slot,
        config.rpc.url.clone(),
    )));

    if let Err(e) = manager.start_all().await {
        logger::error(LogTag::System, &format!("Startup failed: {}", e));
        if let Err(stop_err) = manager.stop_all().await {
            logger::warning(LogTag::System, &format!("Cleanup after failed startup: {}", stop_err));
        }
        logger::flush();
        return Err(AppError::Service(e));
    }

    wait_for_shutdown_signal().await?;
    logger::info(LogTag::System, "Shutdown requested, stopping services...");

    for (name, health) in manager.get_health().await {
        logger::debug(LogTag::System, &format!("{} health at shutdown: {:?}", name, health));
    }

    let result = manager.stop_all().await.map_err(AppError::Service);
    logger::info(LogTag::System, "x1-dashboard stopped");
    logger::flush();
    result
}

#[cfg(unix)]
async fn wait_for_shutdown_signal() -> Result<(), AppError> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result?,
        _ = terminate.recv() => {}
    }
    Ok(())
}

#[cfg(not(unix))]
async fn wait_for_shutdown_signal() -> Result<(), AppError> {
    tokio::signal::ctrl_c().await?;
    Ok(())
}
