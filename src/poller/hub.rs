use super::{Poller, PollerHandle, PollerStatus};
use crate::config::{Config, PollerConfig};
use crate::logger::{self, LogTag};
use crate::metrics::{
    EpochFetcher, EpochSnapshot, GasFetcher, GasSnapshot, MetricFetcher, MetricKind, PingFetcher,
    PingSnapshot, StakingFetcher, StakingSnapshot, SupplyFetcher, SupplySnapshot,
    TransactionSnapshot, TransactionsFetcher, ValidatorsFetcher, ValidatorsSnapshot,
};
use crate::rpc::RpcGateway;
use crate::shutdown::Shutdown;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Handles to every metric poller
#[derive(Clone)]
pub struct MetricsHub {
    pub supply: PollerHandle<SupplySnapshot>,
    pub epoch: PollerHandle<EpochSnapshot>,
    pub transactions: PollerHandle<TransactionSnapshot>,
    pub staking: PollerHandle<StakingSnapshot>,
    pub validators: PollerHandle<ValidatorsSnapshot>,
    pub ping: PollerHandle<PingSnapshot>,
    pub gas: PollerHandle<GasSnapshot>,
}

impl MetricsHub {
    /// Build every fetcher against one gateway and start the enabled pollers
    pub fn spawn(
        gateway: Arc<dyn RpcGateway>,
        config: &Config,
        shutdown: Arc<Shutdown>,
    ) -> (Self, Vec<JoinHandle<()>>) {
        let window = Duration::from_secs(config.logging.throttle_secs);
        let chain = &config.chain;
        let pollers = &config.pollers;
        let mut tasks = Vec::new();

        let hub = Self {
            supply: launch(
                SupplyFetcher::new(gateway.clone()),
                &pollers.supply,
                &shutdown,
                window,
                &mut tasks,
            ),
            epoch: launch(
                EpochFetcher::new(gateway.clone(), chain.slot_duration_ms),
                &pollers.epoch,
                &shutdown,
                window,
                &mut tasks,
            ),
            transactions: launch(
                TransactionsFetcher::new(gateway.clone()),
                &pollers.transactions,
                &shutdown,
                window,
                &mut tasks,
            ),
            staking: launch(
                StakingFetcher::new(gateway.clone()),
                &pollers.staking,
                &shutdown,
                window,
                &mut tasks,
            ),
            validators: launch(
                ValidatorsFetcher::new(gateway.clone(), chain.credits_per_unit, chain.genesis_share),
                &pollers.validators,
                &shutdown,
                window,
                &mut tasks,
            ),
            ping: launch(
                PingFetcher::new(gateway.clone()),
                &pollers.ping,
                &shutdown,
                window,
                &mut tasks,
            ),
            gas: launch(
                GasFetcher::new(gateway, chain.base_fee_lamports, chain.priority_multiplier),
                &pollers.gas,
                &shutdown,
                window,
                &mut tasks,
            ),
        };

        logger::info(
            LogTag::Metrics,
            &format!("Started {} of {} metric pollers", tasks.len(), MetricKind::ALL.len()),
        );

        (hub, tasks)
    }

    /// Force a fetch on every running poller; returns the kinds that accepted
    pub fn refresh_all(&self) -> Vec<MetricKind> {
        let accepted = [
            (MetricKind::Supply, self.supply.refresh()),
            (MetricKind::Epoch, self.epoch.refresh()),
            (MetricKind::Transactions, self.transactions.refresh()),
            (MetricKind::Staking, self.staking.refresh()),
            (MetricKind::Validators, self.validators.refresh()),
            (MetricKind::Ping, self.ping.refresh()),
            (MetricKind::Gas, self.gas.refresh()),
        ];
        accepted
            .into_iter()
            .filter_map(|(kind, ok)| ok.then_some(kind))
            .collect()
    }

    /// Forward a foreground-regained signal; each poller applies its own policy
    pub fn focus_regained_all(&self) {
        self.supply.focus_regained();
        self.epoch.focus_regained();
        self.transactions.focus_regained();
        self.staking.focus_regained();
        self.validators.focus_regained();
        self.ping.focus_regained();
        self.gas.focus_regained();
    }

    pub fn statuses(&self) -> Vec<PollerStatus> {
        vec![
            self.supply.status(),
            self.epoch.status(),
            self.transactions.status(),
            self.staking.status(),
            self.validators.status(),
            self.ping.status(),
            self.gas.status(),
        ]
    }
}

fn launch<F: MetricFetcher>(
    fetcher: F,
    config: &PollerConfig,
    shutdown: &Arc<Shutdown>,
    log_window: Duration,
    tasks: &mut Vec<JoinHandle<()>>,
) -> PollerHandle<F::Output> {
    let kind = fetcher.kind();
    let (poller, handle) = Poller::new(fetcher, config.clone(), shutdown.clone(), log_window);

    if config.enabled {
        tasks.push(poller.spawn());
    } else {
        logger::info(LogTag::Metrics, &format!("{} poller disabled by config", kind));
    }

    handle
}
