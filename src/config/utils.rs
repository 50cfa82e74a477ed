//! Configuration utilities - loading, validation, and access helpers
//!
//! - Loading configuration from disk (TOML)
//! - Validating values that serde cannot check
//! - Thread-safe global access helpers

use super::schemas::Config;
use once_cell::sync::OnceCell;
use std::path::Path;
use std::sync::RwLock;
use url::Url;

/// Global configuration instance
///
/// Set once at startup. Components receive the sections they need by value;
/// the global is for the binary and the webserver status routes.
pub static CONFIG: OnceCell<RwLock<Config>> = OnceCell::new();

/// Default configuration file path
pub const CONFIG_FILE_PATH: &str = "data/config.toml";

/// Read and parse a configuration file without touching the global
///
/// A missing file yields the defaults; a present but invalid file is an error.
pub fn read_config_file(path: &str) -> Result<Config, String> {
    if !Path::new(path).exists() {
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config file '{}': {}", path, e))?;

    toml::from_str::<Config>(&contents)
        .map_err(|e| format!("Failed to parse config file '{}': {}", path, e))
}

/// Check values that deserialize fine but cannot work at runtime
pub fn validate_config(config: &Config) -> Result<(), String> {
    let url = Url::parse(&config.rpc.url)
        .map_err(|e| format!("Invalid rpc.url '{}': {}", config.rpc.url, e))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(format!(
            "Invalid rpc.url '{}': scheme must be http or https",
            config.rpc.url
        ));
    }

    if config.rpc.timeout_secs == 0 {
        return Err("rpc.timeout_secs must be greater than 0".to_string());
    }

    if config.chain.credits_per_unit == 0 {
        return Err("chain.credits_per_unit must be greater than 0".to_string());
    }

    if !(0.0..=1.0).contains(&config.chain.genesis_share) {
        return Err(format!(
            "chain.genesis_share must be within 0.0..=1.0 (got {})",
            config.chain.genesis_share
        ));
    }

    if config.chain.priority_multiplier < 1.0 {
        return Err(format!(
            "chain.priority_multiplier must be at least 1.0 (got {})",
            config.chain.priority_multiplier
        ));
    }

    Ok(())
}

/// Install a configuration as the global CONFIG
pub fn set_config(config: Config) -> Result<(), String> {
    CONFIG
        .set(RwLock::new(config))
        .map_err(|_| "Config already initialized".to_string())
}

/// Execute a function with read access to the configuration
///
/// Falls back to defaults when the global was never initialised, which keeps
/// library consumers and tests working without a config file.
pub fn with_config<F, R>(f: F) -> R
where
    F: FnOnce(&Config) -> R,
{
    match CONFIG.get() {
        Some(lock) => match lock.read() {
            Ok(config) => f(&config),
            Err(poisoned) => f(&poisoned.into_inner()),
        },
        None => f(&Config::default()),
    }
}

/// Get a clone of the entire configuration
pub fn get_config_clone() -> Config {
    with_config(|cfg| cfg.clone())
}

/// Render the configuration as TOML (used by `--print-config`)
pub fn to_toml_string(config: &Config) -> Result<String, String> {
    toml::to_string_pretty(config).map_err(|e| format!("Failed to serialize config: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PollerConfig;
    use std::io::Write;

    #[test]
    fn test_missing_file_yields_defaults() {
        let cfg = read_config_file("/definitely/not/here.toml").unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn test_partial_file_overrides_only_named_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[rpc]
url = "http://localhost:8899"

[pollers.validators]
interval_ms = 0
"#
        )
        .unwrap();

        let cfg = read_config_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(cfg.rpc.url, "http://localhost:8899");
        assert_eq!(cfg.rpc.timeout_secs, 10);
        assert_eq!(cfg.pollers.validators.interval_ms, 0);
        assert_eq!(cfg.pollers.validators.stale_after_ms, 300_000);
        assert!(cfg.pollers.validators.enabled);
        assert_eq!(cfg.pollers.epoch.interval_ms, 5_000);
        assert_eq!(cfg.webserver.port, 8080);
    }

    #[test]
    fn test_partial_poller_section_keeps_that_metrics_defaults() {
        let cfg: Config = toml::from_str("[pollers.supply]\ninterval_ms = 300000\n").unwrap();
        assert_eq!(cfg.pollers.supply.interval_ms, 300_000);
        assert_eq!(cfg.pollers.supply.stale_after_ms, 120_000);
        assert_eq!(cfg.pollers.staking, PollerConfig::slow(120_000));

        let cfg: Config = toml::from_str("[pollers.ping]\nrefetch_on_focus_regain = true\n").unwrap();
        assert!(cfg.pollers.ping.refetch_on_focus_regain);
        assert_eq!(cfg.pollers.ping.interval_ms, 5_000);
        assert_eq!(cfg.pollers.ping.stale_after_ms, 0);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[rpc\nurl = ").unwrap();
        assert!(read_config_file(file.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let mut cfg = Config::default();
        cfg.rpc.url = "ftp://example.com".to_string();
        assert!(validate_config(&cfg).is_err());

        cfg.rpc.url = "not a url".to_string();
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn test_validate_rejects_zero_credits_per_unit() {
        let mut cfg = Config::default();
        cfg.chain.credits_per_unit = 0;
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn test_defaults_are_valid_and_round_trip_through_toml() {
        let cfg = Config::default();
        validate_config(&cfg).unwrap();
        let rendered = to_toml_string(&cfg).unwrap();
        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, cfg);
    }
}
