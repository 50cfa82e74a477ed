use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The seven dashboard metrics, one poller each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Supply,
    Epoch,
    Transactions,
    Staking,
    Validators,
    Ping,
    Gas,
}

impl MetricKind {
    pub const ALL: [MetricKind; 7] = [
        MetricKind::Supply,
        MetricKind::Epoch,
        MetricKind::Transactions,
        MetricKind::Staking,
        MetricKind::Validators,
        MetricKind::Ping,
        MetricKind::Gas,
    ];

    /// Path segment and log name
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Supply => "supply",
            MetricKind::Epoch => "epoch",
            MetricKind::Transactions => "transactions",
            MetricKind::Staking => "staking",
            MetricKind::Validators => "validators",
            MetricKind::Ping => "ping",
            MetricKind::Gas => "gas",
        }
    }

    /// Client-facing error text when no value can be served
    pub fn failure_message(&self) -> &'static str {
        match self {
            MetricKind::Supply => "Failed to fetch supply data",
            MetricKind::Epoch => "Failed to fetch epoch data",
            MetricKind::Transactions => "Failed to fetch transaction data",
            MetricKind::Staking => "Failed to fetch staking data",
            MetricKind::Validators => "Failed to fetch validators",
            MetricKind::Ping => "Failed to measure ping",
            MetricKind::Gas => "Failed to fetch gas prices",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetricKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown metric: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_names() {
        for kind in MetricKind::ALL {
            assert_eq!(kind.as_str().parse::<MetricKind>().unwrap(), kind);
        }
        assert_eq!("  PING ".parse::<MetricKind>().unwrap(), MetricKind::Ping);
        assert!("fees".parse::<MetricKind>().is_err());
    }

    #[test]
    fn test_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&MetricKind::Validators).unwrap(),
            "\"validators\""
        );
    }
}
