//! Structured logging for the dashboard core
//!
//! This module provides a small, ergonomic logging API with:
//! - Standard log levels (Error/Warning/Info/Debug/Verbose)
//! - Per-tag debug control via `--debug <tag>` flags
//! - Dual output: colored console + optional file persistence
//! - A `ThrottledLogger` for call sites that fire on every poll
//!
//! ## Usage
//!
//! ```rust
//! use x1_dashboard::logger::{self, LogTag};
//!
//! logger::error(LogTag::Rpc, "Connection failed");
//! logger::warning(LogTag::Poller, "staking fetch failed");
//! logger::info(LogTag::System, "Service started");
//! logger::debug(LogTag::Metrics, "Raw epoch payload: ..."); // Only with --debug metrics
//! logger::verbose(LogTag::Rpc, "Request body: ..."); // Only with --verbose
//! ```
//!
//! ## Initialization
//!
//! Call once at startup, after configuration is loaded:
//! ```rust,ignore
//! logger::init(LoggerConfig::default());
//! ```

mod config;
mod core;
mod file;
mod format;
mod levels;
mod tags;
mod throttle;

pub use config::{get_logger_config, set_logger_config, LoggerConfig};
pub use levels::LogLevel;
pub use tags::LogTag;
pub use throttle::ThrottledLogger;

/// Initialize the logger system
///
/// Installs the given configuration and opens the log file when file
/// logging is enabled. Safe to call more than once; the last call wins.
pub fn init(config: LoggerConfig) {
    let file_path = if config.file_enabled {
        Some(config.file_path.clone())
    } else {
        None
    };

    set_logger_config(config);

    if let Some(path) = file_path {
        if let Err(e) = file::init_file_logging(&path) {
            eprintln!("Failed to open log file '{}': {}", path.display(), e);
        }
    }
}

/// Log at ERROR level (always shown, critical issues)
pub fn error(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Error, message);
}

/// Log at WARNING level (important issues)
///
/// Warnings are shown by default (unless `--quiet` is used).
pub fn warning(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Warning, message);
}

/// Log at INFO level (standard operations)
pub fn info(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Info, message);
}

/// Log at DEBUG level (detailed diagnostics)
///
/// Debug logs are ONLY shown when `--debug <tag>` was given for the tag.
pub fn debug(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Debug, message);
}

/// Log at VERBOSE level (very detailed tracing)
///
/// Verbose logs are ONLY shown when `--verbose` was given.
pub fn verbose(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Verbose, message);
}

/// Log at an explicit level
pub fn log(tag: LogTag, level: LogLevel, message: &str) {
    core::log_internal(tag, level, message);
}

/// Force flush all pending log writes
///
/// Call this during shutdown to ensure all logs are written to disk.
pub fn flush() {
    file::flush_file_logging();
}
