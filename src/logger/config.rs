/// Runtime logger configuration
///
/// Holds the minimum level, per-tag debug switches and the file sink
/// settings. Stored globally so every call site can filter cheaply.
use super::levels::LogLevel;
use super::tags::LogTag;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashSet;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Messages above this level are dropped
    pub min_level: LogLevel,

    /// Tags with debug output enabled (`--debug <tag>`), "all" enables every tag
    pub debug_tags: HashSet<String>,

    /// Restrict output to these tags (empty = all tags)
    pub enabled_tags: HashSet<String>,

    /// Mirror console output to a file
    pub file_enabled: bool,

    /// Log file location
    pub file_path: PathBuf,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            debug_tags: HashSet::new(),
            enabled_tags: HashSet::new(),
            file_enabled: false,
            file_path: PathBuf::from("logs/x1-dashboard.log"),
        }
    }
}

impl LoggerConfig {
    /// Build a config from CLI-style switches
    pub fn from_flags(debug_tags: &[String], verbose: bool, quiet: bool) -> Self {
        let mut config = Self::default();

        if quiet {
            config.min_level = LogLevel::Warning;
        }
        if !debug_tags.is_empty() {
            config.min_level = LogLevel::Debug;
            config.debug_tags = debug_tags.iter().map(|t| t.to_lowercase()).collect();
        }
        if verbose {
            config.min_level = LogLevel::Verbose;
        }

        config
    }
}

static LOGGER_CONFIG: Lazy<RwLock<LoggerConfig>> =
    Lazy::new(|| RwLock::new(LoggerConfig::default()));

/// Get a copy of the current logger configuration
pub fn get_logger_config() -> LoggerConfig {
    LOGGER_CONFIG.read().clone()
}

/// Replace the logger configuration
pub fn set_logger_config(config: LoggerConfig) {
    *LOGGER_CONFIG.write() = config;
}

pub(crate) fn is_debug_enabled_for_tag(config: &LoggerConfig, tag: &LogTag) -> bool {
    config.debug_tags.contains("all") || config.debug_tags.contains(&tag.to_debug_key())
}
