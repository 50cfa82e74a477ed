//! Per-metric polling loops
//!
//! One `Poller` task per metric. It owns its fetcher and its state, runs at
//! most one fetch at a time and publishes every state change on a watch
//! channel. Ticks and commands that arrive while a fetch is outstanding are
//! absorbed by that fetch.

mod handle;
mod hub;
mod state;

pub use handle::{PollCommand, PollerHandle};
pub use hub::MetricsHub;
pub use state::{PollPhase, PollerState, PollerStatus};

use crate::config::PollerConfig;
use crate::logger::{self, LogTag, ThrottledLogger};
use crate::metrics::{MetricFetcher, MetricKind, RequestContext};
use crate::shutdown::Shutdown;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

const COMMAND_QUEUE: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    Tick,
    Refresh,
    FocusRegained,
}

pub struct Poller<F: MetricFetcher> {
    kind: MetricKind,
    fetcher: F,
    config: PollerConfig,
    state: PollerState<F::Output>,
    publisher: watch::Sender<PollerState<F::Output>>,
    commands: mpsc::Receiver<PollCommand>,
    shutdown: Arc<Shutdown>,
    success_log: ThrottledLogger,
    failure_log: ThrottledLogger,
}

impl<F: MetricFetcher> Poller<F> {
    /// Build a poller and the handle that reads from it
    pub fn new(
        fetcher: F,
        config: PollerConfig,
        shutdown: Arc<Shutdown>,
        log_window: Duration,
    ) -> (Self, PollerHandle<F::Output>) {
        let kind = fetcher.kind();
        let (publisher, state_rx) = watch::channel(PollerState::default());
        let (command_tx, commands) = mpsc::channel(COMMAND_QUEUE);

        let handle = PollerHandle::new(kind, config.clone(), state_rx, command_tx);
        let poller = Self {
            kind,
            fetcher,
            config,
            state: PollerState::default(),
            publisher,
            commands,
            shutdown,
            success_log: ThrottledLogger::new(LogTag::Poller, log_window),
            failure_log: ThrottledLogger::new(LogTag::Poller, log_window),
        };

        (poller, handle)
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Run until shutdown
    ///
    /// The first fetch happens immediately. Afterwards a tick fires
    /// `interval_ms` after each fetch completes and only fetches when the
    /// cached value is stale. With `interval_ms == 0` there are no ticks.
    pub async fn run(mut self) {
        let interval = self.config.interval();
        let stale_after = self.config.stale_after();
        let mut next_tick = Some(Instant::now());
        let mut commands_open = true;

        logger::debug(
            LogTag::Poller,
            &format!(
                "{} poller started (interval={}ms, stale_after={}ms, focus_refetch={})",
                self.kind,
                self.config.interval_ms,
                self.config.stale_after_ms,
                self.config.refetch_on_focus_regain
            ),
        );

        loop {
            let trigger = tokio::select! {
                biased;
                _ = self.shutdown.wait() => break,
                command = self.commands.recv(), if commands_open => match command {
                    Some(PollCommand::Refresh) => Trigger::Refresh,
                    Some(PollCommand::FocusRegained) => Trigger::FocusRegained,
                    None => {
                        commands_open = false;
                        continue;
                    }
                },
                _ = sleep_until(next_tick.unwrap_or_else(Instant::now)), if next_tick.is_some() => Trigger::Tick,
            };

            let stale = self.state.is_stale(stale_after, Instant::now());
            let should_fetch = match trigger {
                Trigger::Refresh => true,
                Trigger::FocusRegained => self.config.refetch_on_focus_regain && stale,
                Trigger::Tick => stale,
            };

            if !should_fetch {
                if trigger == Trigger::Tick {
                    next_tick = interval.map(|d| Instant::now() + d);
                }
                continue;
            }

            if !self.fetch_once().await {
                break;
            }

            // requests that queued up during the fetch were satisfied by it
            while self.commands.try_recv().is_ok() {}

            next_tick = interval.map(|d| Instant::now() + d);
        }

        logger::debug(LogTag::Poller, &format!("{} poller stopped", self.kind));
    }

    /// Returns false when shutdown interrupted the fetch
    async fn fetch_once(&mut self) -> bool {
        let ctx = RequestContext::new(self.kind);
        self.state.begin_fetch();
        self.publish();

        logger::verbose(
            LogTag::Poller,
            &format!("[{}] fetching {}", ctx.short_id(), self.kind),
        );

        let result = tokio::select! {
            biased;
            _ = self.shutdown.wait() => {
                logger::debug(
                    LogTag::Poller,
                    &format!("[{}] {} fetch dropped on shutdown", ctx.short_id(), self.kind),
                );
                return false;
            }
            result = self.fetcher.fetch(&ctx) => result,
        };

        if self.shutdown.is_triggered() {
            return false;
        }

        let now = Instant::now();
        match result {
            Ok(value) => {
                let recovered = self.state.last_error.is_some();
                self.state.record_success(value, now);
                if recovered {
                    self.failure_log.reset();
                    logger::info(
                        LogTag::Poller,
                        &format!("{} fetch recovered", self.kind),
                    );
                } else {
                    self.success_log.debug(&format!(
                        "[{}] {} updated ({} fetches)",
                        ctx.short_id(),
                        self.kind,
                        self.state.fetch_count
                    ));
                }
            }
            Err(e) => {
                let message = e.to_string();
                self.failure_log.warning(&format!(
                    "[{}] {} fetch failed: {}",
                    ctx.short_id(),
                    self.kind,
                    message
                ));
                self.state.record_failure(message, now);
            }
        }

        self.publish();
        true
    }

    fn publish(&self) {
        self.publisher.send_replace(self.state.clone());
    }
}
