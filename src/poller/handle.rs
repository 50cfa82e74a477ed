use super::state::{PollPhase, PollerState, PollerStatus};
use crate::config::PollerConfig;
use crate::metrics::MetricKind;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::Instant;

/// Out-of-cadence requests a poller accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollCommand {
    /// Fetch now regardless of staleness
    Refresh,
    /// The dashboard came back to the foreground
    FocusRegained,
}

/// Read side of one poller plus its command channel
pub struct PollerHandle<T> {
    kind: MetricKind,
    config: PollerConfig,
    state: watch::Receiver<PollerState<T>>,
    commands: mpsc::Sender<PollCommand>,
}

impl<T> Clone for PollerHandle<T> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            config: self.config.clone(),
            state: self.state.clone(),
            commands: self.commands.clone(),
        }
    }
}

impl<T> PollerHandle<T> {
    pub(crate) fn new(
        kind: MetricKind,
        config: PollerConfig,
        state: watch::Receiver<PollerState<T>>,
        commands: mpsc::Sender<PollCommand>,
    ) -> Self {
        Self {
            kind,
            config,
            state,
            commands,
        }
    }

    pub fn kind(&self) -> MetricKind {
        self.kind
    }

    pub fn config(&self) -> &PollerConfig {
        &self.config
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Latest published state
    pub fn current(&self) -> PollerState<T> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PollerState<T>> {
        self.state.clone()
    }

    /// Ask for a forced fetch; returns false when the poller is gone
    pub fn refresh(&self) -> bool {
        self.send(PollCommand::Refresh)
    }

    pub fn focus_regained(&self) -> bool {
        self.send(PollCommand::FocusRegained)
    }

    fn send(&self, command: PollCommand) -> bool {
        match self.commands.try_send(command) {
            Ok(()) => true,
            // a full queue already holds a request the next fetch will absorb
            Err(mpsc::error::TrySendError::Full(_)) => true,
            Err(mpsc::error::TrySendError::Closed(_)) => false,
        }
    }

    /// Wait until the metric has a value or an error, up to `timeout`
    pub async fn wait_for_outcome(&self, timeout: Duration) -> Option<PollerState<T>> {
        let mut rx = self.state.clone();
        let waited = tokio::time::timeout(timeout, rx.wait_for(|s| s.has_outcome())).await;
        match waited {
            Ok(Ok(state)) => Some(state.clone()),
            _ => None,
        }
    }

    pub fn status(&self) -> PollerStatus {
        let state = self.state.borrow();
        let now = Instant::now();

        let next_update_in_ms = match (self.config.interval(), state.phase) {
            (Some(interval), PollPhase::Idle) if self.config.enabled => {
                let elapsed = state
                    .last_completed_instant
                    .map(|at| now.saturating_duration_since(at))
                    .unwrap_or_default();
                Some(interval.saturating_sub(elapsed).as_millis() as u64)
            }
            _ => None,
        };

        PollerStatus {
            kind: self.kind,
            enabled: self.config.enabled,
            phase: state.phase,
            has_value: state.last_value.is_some(),
            stale: state.is_stale(self.config.stale_after(), now),
            last_error: state.last_error.clone(),
            last_success_at: state.last_success_at,
            last_fetch_started_at: state.last_fetch_started_at,
            fetch_count: state.fetch_count,
            success_count: state.success_count,
            error_count: state.error_count,
            interval_ms: self.config.interval_ms,
            stale_after_ms: self.config.stale_after_ms,
            next_update_in_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detached(
        config: PollerConfig,
    ) -> (
        watch::Sender<PollerState<u64>>,
        mpsc::Receiver<PollCommand>,
        PollerHandle<u64>,
    ) {
        let (state_tx, state_rx) = watch::channel(PollerState::default());
        let (command_tx, command_rx) = mpsc::channel(1);
        let handle = PollerHandle::new(MetricKind::Epoch, config, state_rx, command_tx);
        (state_tx, command_rx, handle)
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_for_outcome_returns_published_failure() {
        let (state_tx, _commands, handle) = detached(PollerConfig::fast());

        let waiter = {
            let handle = handle.clone();
            tokio::spawn(async move { handle.wait_for_outcome(Duration::from_secs(1)).await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;

        let mut state = PollerState::default();
        state.record_failure("node down".to_string(), Instant::now());
        state_tx.send_replace(state);

        let seen = waiter.await.unwrap().unwrap();
        assert!(seen.last_value.is_none());
        assert_eq!(seen.last_error.as_deref(), Some("node down"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_for_outcome_returns_existing_value_at_once() {
        let (state_tx, _commands, handle) = detached(PollerConfig::fast());
        let mut state = PollerState::default();
        state.record_success(7, Instant::now());
        state_tx.send_replace(state);

        let seen = handle.wait_for_outcome(Duration::ZERO).await;
        assert_eq!(seen.and_then(|s| s.last_value).as_deref(), Some(&7));
    }

    #[tokio::test]
    async fn test_full_queue_still_counts_as_requested() {
        let (_state_tx, commands, handle) = detached(PollerConfig::fast());
        assert!(handle.refresh());
        assert!(handle.focus_regained());

        drop(commands);
        assert!(!handle.refresh());
    }
}
