/// Command-line arguments
///
/// Flags override the configuration file; the file overrides built-in
/// defaults.
use crate::config::{Config, CONFIG_FILE_PATH};
use crate::logger::LoggerConfig;
use clap::Parser;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "x1-dashboard", version, about = "Chain metrics poller and HTTP API for the X1 dashboard")]
pub struct Args {
    /// Configuration file (TOML)
    #[arg(long, default_value = CONFIG_FILE_PATH)]
    pub config: String,

    /// Override rpc.url
    #[arg(long = "rpc-url")]
    pub rpc_url: Option<String>,

    /// Override webserver.host
    #[arg(long)]
    pub host: Option<String>,

    /// Override webserver.port
    #[arg(long)]
    pub port: Option<u16>,

    /// Enable debug logs for a tag (repeatable: rpc, poller, metrics, webserver, system, config, all)
    #[arg(long = "debug", value_name = "TAG")]
    pub debug: Vec<String>,

    /// Verbose logging for every tag
    #[arg(long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only warnings and errors
    #[arg(long)]
    pub quiet: bool,

    /// Print the effective configuration and exit
    #[arg(long = "print-config")]
    pub print_config: bool,
}

impl Args {
    /// Apply CLI overrides on top of a loaded configuration
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(url) = &self.rpc_url {
            config.rpc.url = url.clone();
        }
        if let Some(host) = &self.host {
            config.webserver.host = host.clone();
        }
        if let Some(port) = self.port {
            config.webserver.port = port;
        }
    }

    pub fn logger_config(&self, config: &Config) -> LoggerConfig {
        let mut logger_config = LoggerConfig::from_flags(&self.debug, self.verbose, self.quiet);
        logger_config.file_enabled = config.logging.file_enabled;
        logger_config.file_path = config.logging.file_path.clone().into();
        logger_config
    }
}
