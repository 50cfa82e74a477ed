use super::MetricKind;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Per-fetch context handed to the fetcher and on to the gateway
///
/// The correlation id doubles as the JSON-RPC request id, so one dashboard
/// refresh can be traced through the logs and the node's request log.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub correlation_id: Uuid,
    pub kind: MetricKind,
    pub started_at: DateTime<Utc>,
}

impl RequestContext {
    pub fn new(kind: MetricKind) -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            kind,
            started_at: Utc::now(),
        }
    }

    /// First eight hex digits, enough to tell log lines apart
    pub fn short_id(&self) -> String {
        self.correlation_id.simple().to_string()[..8].to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contexts_get_distinct_ids() {
        let a = RequestContext::new(MetricKind::Epoch);
        let b = RequestContext::new(MetricKind::Epoch);
        assert_ne!(a.correlation_id, b.correlation_id);
        assert_eq!(a.short_id().len(), 8);
    }
}
