// Configuration schema - every section with its defaults

use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;

// ============================================================================
// RPC CONFIGURATION
// ============================================================================

config_struct! {
    /// Upstream JSON-RPC endpoint
    pub struct RpcConfig {
        /// Endpoint URL (http or https)
        url: String = "https://rpc.testnet.x1.xyz/".to_string(),

        /// Per-request timeout in seconds
        timeout_secs: u64 = 10,

        /// Commitment level sent with commitment-aware methods
        commitment: String = "confirmed".to_string(),
    }
}

// ============================================================================
// WEBSERVER CONFIGURATION
// ============================================================================

config_struct! {
    /// HTTP surface consumed by the dashboard
    pub struct WebserverConfig {
        /// Host/IP address to bind the webserver
        host: String = "127.0.0.1".to_string(),

        /// Port to bind the webserver
        port: u16 = 8080,

        /// How long a metric request waits for the first fetch of a metric
        /// that has never produced an outcome
        request_timeout_ms: u64 = 15_000,

        /// Allow cross-origin reads (dashboard served from another origin)
        cors_permissive: bool = true,
    }
}

// ============================================================================
// CHAIN CONSTANTS
// ============================================================================

config_struct! {
    /// Chain-specific conversion constants
    pub struct ChainConfig {
        /// Expected slot duration, used for epoch time-remaining estimates
        slot_duration_ms: u64 = 400,

        /// Vote credits that convert to one unit of potential airdrop
        credits_per_unit: u64 = 50_000,

        /// Share of the potential airdrop released at genesis
        genesis_share: f64 = 0.10,

        /// Base fee per signature in lamports
        base_fee_lamports: u64 = 5_000,

        /// Multiplier applied to the base fee for the "fast" tier
        priority_multiplier: f64 = 1.5,
    }
}

// ============================================================================
// POLLERS
// ============================================================================

config_struct! {
    /// Cadence and staleness policy for one metric loop
    pub struct PollerConfig {
        /// Run this loop at all
        enabled: bool = true,

        /// Delay between a fetch completing and the next scheduled tick
        /// (0 = fetch once at startup, then only on demand)
        interval_ms: u64 = 5_000,

        /// Age after which a cached value is considered stale (0 = always stale)
        stale_after_ms: u64 = 0,

        /// Fetch out of cadence when the dashboard regains focus
        refetch_on_focus_regain: bool = false,
    }
}

impl PollerConfig {
    /// Fast cadence: every 5 seconds, never fresh
    pub fn fast() -> Self {
        Self::default()
    }

    /// Slow cadence with matching staleness tolerance
    pub fn slow(interval_ms: u64) -> Self {
        Self {
            enabled: true,
            interval_ms,
            stale_after_ms: interval_ms,
            refetch_on_focus_regain: false,
        }
    }

    pub fn interval(&self) -> Option<Duration> {
        if self.interval_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.interval_ms))
        }
    }

    pub fn stale_after(&self) -> Duration {
        Duration::from_millis(self.stale_after_ms)
    }
}

/// Fields a `[pollers.<kind>]` section may set; the rest keep that kind's defaults
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PollerOverrides {
    enabled: Option<bool>,
    interval_ms: Option<u64>,
    stale_after_ms: Option<u64>,
    refetch_on_focus_regain: Option<bool>,
}

impl PollerOverrides {
    fn apply(self, base: PollerConfig) -> PollerConfig {
        PollerConfig {
            enabled: self.enabled.unwrap_or(base.enabled),
            interval_ms: self.interval_ms.unwrap_or(base.interval_ms),
            stale_after_ms: self.stale_after_ms.unwrap_or(base.stale_after_ms),
            refetch_on_focus_regain: self
                .refetch_on_focus_regain
                .unwrap_or(base.refetch_on_focus_regain),
        }
    }
}

/// One poller per metric kind
///
/// Slow metrics tolerate staleness for one interval, fast metrics never do.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollersConfig {
    pub supply: PollerConfig,
    pub epoch: PollerConfig,
    pub transactions: PollerConfig,
    pub staking: PollerConfig,
    pub validators: PollerConfig,
    pub ping: PollerConfig,
    pub gas: PollerConfig,
}

impl Default for PollersConfig {
    fn default() -> Self {
        Self {
            supply: PollerConfig::slow(120_000),
            epoch: PollerConfig::fast(),
            transactions: PollerConfig::fast(),
            staking: PollerConfig::slow(120_000),
            validators: PollerConfig::slow(300_000),
            ping: PollerConfig::fast(),
            gas: PollerConfig::fast(),
        }
    }
}

impl<'de> Deserialize<'de> for PollersConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Default, Deserialize)]
        #[serde(default)]
        struct Sections {
            supply: PollerOverrides,
            epoch: PollerOverrides,
            transactions: PollerOverrides,
            staking: PollerOverrides,
            validators: PollerOverrides,
            ping: PollerOverrides,
            gas: PollerOverrides,
        }

        let sections = Sections::deserialize(deserializer)?;
        let defaults = PollersConfig::default();
        Ok(Self {
            supply: sections.supply.apply(defaults.supply),
            epoch: sections.epoch.apply(defaults.epoch),
            transactions: sections.transactions.apply(defaults.transactions),
            staking: sections.staking.apply(defaults.staking),
            validators: sections.validators.apply(defaults.validators),
            ping: sections.ping.apply(defaults.ping),
            gas: sections.gas.apply(defaults.gas),
        })
    }
}

// ============================================================================
// LOGGING
// ============================================================================

config_struct! {
    /// Logging output settings
    pub struct LoggingConfig {
        /// Mirror console output to a file
        file_enabled: bool = false,

        /// Log file location
        file_path: String = "logs/x1-dashboard.log".to_string(),

        /// Window for throttled per-poll logging
        throttle_secs: u64 = 30,
    }
}

// ============================================================================
// ROOT CONFIGURATION
// ============================================================================

config_struct! {
    /// Root configuration structure containing all sub-configurations
    pub struct Config {
        rpc: RpcConfig = RpcConfig::default(),
        webserver: WebserverConfig = WebserverConfig::default(),
        chain: ChainConfig = ChainConfig::default(),
        pollers: PollersConfig = PollersConfig::default(),
        logging: LoggingConfig = LoggingConfig::default(),
    }
}
