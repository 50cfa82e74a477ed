//! Per-metric poller state and its serializable status view

use crate::metrics::MetricKind;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PollPhase {
    Idle,
    Fetching,
}

/// What one poller knows about its metric
///
/// Only the owning poller mutates this; everyone else sees published copies.
#[derive(Debug)]
pub struct PollerState<T> {
    pub last_value: Option<Arc<T>>,
    pub last_error: Option<String>,
    pub last_fetch_started_at: Option<DateTime<Utc>>,
    pub last_success_at: Option<DateTime<Utc>>,
    pub phase: PollPhase,
    pub fetch_count: u64,
    pub success_count: u64,
    pub error_count: u64,
    /// Monotonic instant of the last success, for staleness
    pub(crate) last_success_instant: Option<Instant>,
    /// Monotonic instant the last fetch finished, for next-tick estimates
    pub(crate) last_completed_instant: Option<Instant>,
}

impl<T> Default for PollerState<T> {
    fn default() -> Self {
        Self {
            last_value: None,
            last_error: None,
            last_fetch_started_at: None,
            last_success_at: None,
            phase: PollPhase::Idle,
            fetch_count: 0,
            success_count: 0,
            error_count: 0,
            last_success_instant: None,
            last_completed_instant: None,
        }
    }
}

impl<T> Clone for PollerState<T> {
    fn clone(&self) -> Self {
        Self {
            last_value: self.last_value.clone(),
            last_error: self.last_error.clone(),
            last_fetch_started_at: self.last_fetch_started_at,
            last_success_at: self.last_success_at,
            phase: self.phase,
            fetch_count: self.fetch_count,
            success_count: self.success_count,
            error_count: self.error_count,
            last_success_instant: self.last_success_instant,
            last_completed_instant: self.last_completed_instant,
        }
    }
}

impl<T> PollerState<T> {
    pub fn in_flight(&self) -> bool {
        self.phase == PollPhase::Fetching
    }

    /// A fetch has completed at least once, successfully or not
    pub fn has_outcome(&self) -> bool {
        self.last_value.is_some() || self.last_error.is_some()
    }

    /// Absent values are always stale; a zero tolerance means always stale
    pub fn is_stale(&self, stale_after: Duration, now: Instant) -> bool {
        match (&self.last_value, self.last_success_instant) {
            (Some(_), Some(at)) => {
                stale_after.is_zero() || now.saturating_duration_since(at) >= stale_after
            }
            _ => true,
        }
    }

    pub(crate) fn begin_fetch(&mut self) {
        self.phase = PollPhase::Fetching;
        self.fetch_count += 1;
        self.last_fetch_started_at = Some(Utc::now());
    }

    pub(crate) fn record_success(&mut self, value: T, now: Instant) {
        self.last_value = Some(Arc::new(value));
        self.last_error = None;
        self.last_success_at = Some(Utc::now());
        self.last_success_instant = Some(now);
        self.last_completed_instant = Some(now);
        self.success_count += 1;
        self.phase = PollPhase::Idle;
    }

    /// The previous value survives a failure
    pub(crate) fn record_failure(&mut self, error: String, now: Instant) {
        self.last_error = Some(error);
        self.last_completed_instant = Some(now);
        self.error_count += 1;
        self.phase = PollPhase::Idle;
    }
}

/// Status row for `GET /metrics/status`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PollerStatus {
    pub kind: MetricKind,
    pub enabled: bool,
    pub phase: PollPhase,
    pub has_value: bool,
    pub stale: bool,
    pub last_error: Option<String>,
    pub last_success_at: Option<DateTime<Utc>>,
    pub last_fetch_started_at: Option<DateTime<Utc>>,
    pub fetch_count: u64,
    pub success_count: u64,
    pub error_count: u64,
    pub interval_ms: u64,
    pub stale_after_ms: u64,
    /// Estimated wait until the next scheduled tick; None while fetching or
    /// when the metric only refreshes on demand
    pub next_update_in_ms: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_absent_value_is_stale() {
        let state: PollerState<u32> = PollerState::default();
        assert!(state.is_stale(Duration::from_secs(60), Instant::now()));
        assert!(!state.has_outcome());
    }

    #[tokio::test(start_paused = true)]
    async fn test_staleness_window() {
        let mut state: PollerState<u32> = PollerState::default();
        state.begin_fetch();
        state.record_success(7, Instant::now());

        let window = Duration::from_secs(120);
        assert!(!state.is_stale(window, Instant::now()));
        assert!(state.is_stale(Duration::ZERO, Instant::now()));

        tokio::time::advance(window).await;
        assert!(state.is_stale(window, Instant::now()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_keeps_last_value() {
        let mut state: PollerState<u32> = PollerState::default();
        state.begin_fetch();
        state.record_success(7, Instant::now());
        state.begin_fetch();
        assert!(state.in_flight());
        state.record_failure("boom".to_string(), Instant::now());

        assert_eq!(state.last_value.as_deref(), Some(&7));
        assert_eq!(state.last_error.as_deref(), Some("boom"));
        assert_eq!(state.fetch_count, 2);
        assert_eq!(state.success_count, 1);
        assert_eq!(state.error_count, 1);
        assert!(!state.in_flight());
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_clears_error() {
        let mut state: PollerState<u32> = PollerState::default();
        state.begin_fetch();
        state.record_failure("boom".to_string(), Instant::now());
        assert!(state.has_outcome());
        state.begin_fetch();
        state.record_success(1, Instant::now());
        assert!(state.last_error.is_none());
    }
}
