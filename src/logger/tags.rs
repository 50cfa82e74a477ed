/// Log tags identify the subsystem a message comes from
///
/// Tags drive both console coloring and per-tag debug gating
/// (`--debug rpc`, `--debug poller`, ...).

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogTag {
    System,
    Config,
    Rpc,
    Poller,
    Metrics,
    Webserver,
    Test,
    Other(String),
}

impl LogTag {
    /// Key used by `--debug <key>` and `enabled_tags`
    pub fn to_debug_key(&self) -> String {
        match self {
            LogTag::System => "system".to_string(),
            LogTag::Config => "config".to_string(),
            LogTag::Rpc => "rpc".to_string(),
            LogTag::Poller => "poller".to_string(),
            LogTag::Metrics => "metrics".to_string(),
            LogTag::Webserver => "webserver".to_string(),
            LogTag::Test => "test".to_string(),
            LogTag::Other(s) => s.to_lowercase(),
        }
    }

    /// Uncolored label for the file sink
    pub fn to_plain_string(&self) -> String {
        match self {
            LogTag::System => "SYSTEM".to_string(),
            LogTag::Config => "CONFIG".to_string(),
            LogTag::Rpc => "RPC".to_string(),
            LogTag::Poller => "POLLER".to_string(),
            LogTag::Metrics => "METRICS".to_string(),
            LogTag::Webserver => "WEBSERVER".to_string(),
            LogTag::Test => "TEST".to_string(),
            LogTag::Other(s) => s.to_uppercase(),
        }
    }
}

impl std::fmt::Display for LogTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_plain_string())
    }
}
