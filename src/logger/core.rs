/// Core logging implementation with automatic filtering
///
/// Checks whether a message should be displayed and hands it to the
/// format module for output.
use super::config::{get_logger_config, is_debug_enabled_for_tag, LoggerConfig};
use super::levels::LogLevel;
use super::tags::LogTag;

/// Check if a log message should be displayed
///
/// Filtering rules:
/// 1. Errors are always shown
/// 2. Check against minimum log level threshold
/// 3. Debug level requires `--debug <tag>` for that tag
/// 4. Verbose level requires `--verbose`
/// 5. If enabled_tags is non-empty, tag must be in the set
pub fn should_log(config: &LoggerConfig, tag: &LogTag, level: LogLevel) -> bool {
    if level == LogLevel::Error {
        return true;
    }

    if level > config.min_level {
        return false;
    }

    if level == LogLevel::Debug && config.min_level < LogLevel::Verbose {
        return is_debug_enabled_for_tag(config, tag);
    }

    if !config.enabled_tags.is_empty() && !config.enabled_tags.contains(&tag.to_debug_key()) {
        return false;
    }

    true
}

/// Internal logging function with automatic filtering
pub fn log_internal(tag: LogTag, level: LogLevel, message: &str) {
    let config = get_logger_config();
    if !should_log(&config, &tag, level) {
        return;
    }

    super::format::format_and_log(&tag, level, message);
}
