//! UPS monitor
//!
//! Orchestrates one invocation: flush the pending queue, poll the UPS,
//! detect transitions, notify, persist the new state and, if the battery
//! went critical, halt the host.

use crate::alerts::{
    detect, AlertEvent, DispatchOutcome, Dispatcher, FlushOutcome, MessageFormatter, Thresholds,
};
use crate::domain::{ObservedState, PersistedState};
use crate::error::AppError;
use crate::services::{ShutdownOutcome, ShutdownService};
use crate::store::StateStore;
use crate::ups::StatusSource;

use serde::Serialize;
use std::time::Duration;

/// Configuration for the monitor
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Interval between ticks in watch mode
    pub interval: Duration,
    /// Stop watch mode after this many ticks
    pub max_ticks: Option<u64>,
    /// Detector thresholds
    pub thresholds: Thresholds,
    /// Evaluate and log without side effects
    pub dry_run: bool,
}

/// Everything one invocation decided
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Outcome of the pending queue flush
    pub flush: FlushOutcome,
    /// State left by the previous run
    pub previous: PersistedState,
    /// State observed by this run
    pub observed: ObservedState,
    /// Alerts that fired
    pub events: Vec<AlertEvent>,
    /// Delivery outcome per alert, in the same order
    pub deliveries: Vec<DispatchOutcome>,
    /// What the shutdown service did
    pub shutdown: ShutdownOutcome,
    /// Whether the new state was written
    pub state_saved: bool,
}

/// Periodic UPS monitor
pub struct Monitor<S: StatusSource> {
    config: MonitorConfig,
    source: S,
    store: StateStore,
    dispatcher: Dispatcher,
    shutdown: ShutdownService,
    formatter: MessageFormatter,
}

impl<S: StatusSource> Monitor<S> {
    /// Create a new monitor
    pub fn new(
        config: MonitorConfig,
        source: S,
        store: StateStore,
        dispatcher: Dispatcher,
        shutdown: ShutdownService,
        formatter: MessageFormatter,
    ) -> Self {
        Self {
            config,
            source,
            store,
            dispatcher,
            shutdown,
            formatter,
        }
    }

    /// Execute a single invocation
    ///
    /// An unreadable UPS aborts before the state store is touched. A failed
    /// state write is returned as an error, but only after the shutdown
    /// decision has been carried out.
    pub fn run_once(&mut self) -> Result<RunReport, AppError> {
        self.dispatcher.reset_probe();
        let flush = self.dispatcher.flush_pending();

        let observed = match self.source.poll() {
            Ok(observed) => observed,
            Err(e) => {
                log::error!("Poll of {} failed: {}", self.source.describe(), e);
                return Err(e.into());
            }
        };
        log::info!("Polled {}: {}", self.source.describe(), observed);

        let previous = self.store.load();
        if previous.is_sentinel() {
            log::info!("No previous state, evaluating {} as a first run", observed);
        }
        let events = detect(&previous, &observed, &self.config.thresholds);
        if events.is_empty() {
            log::info!("Transition {} -> {}: no alerts", previous, observed);
        } else {
            for event in &events {
                log::info!("Transition {} -> {}: {}", previous, observed, event);
            }
        }

        let deliveries: Vec<_> = events
            .iter()
            .map(|event| self.dispatcher.dispatch(&self.formatter.event(event)))
            .collect();

        // Written before the halt: the shutdown may kill this process
        let saved = if self.config.dry_run {
            log::info!("DRY RUN: Would save state {}", observed);
            Ok(false)
        } else {
            self.store
                .save(&PersistedState::from(observed))
                .map(|()| true)
        };

        let shutdown = self.shutdown.maybe_shutdown(&events);

        let state_saved = match saved {
            Ok(saved) => saved,
            Err(e) => {
                log::error!("Cannot save state, next run's detection is unreliable: {}", e);
                return Err(e.into());
            }
        };

        Ok(RunReport {
            flush,
            previous,
            observed,
            events,
            deliveries,
            shutdown,
            state_saved,
        })
    }

    /// Run invocations back to back until `max_ticks` is reached
    ///
    /// Failed ticks are logged and the loop carries on.
    pub fn run(&mut self) -> Result<(), AppError> {
        let mut ticks = 0u64;
        loop {
            match self.run_once() {
                Ok(report) => log::debug!("Tick {} finished: {:?}", ticks + 1, report.shutdown),
                Err(e) => log::error!("Tick {} failed: {}", ticks + 1, e),
            }
            ticks += 1;

            if self.config.max_ticks.is_some_and(|max| ticks >= max) {
                log::info!("Stopping after {} tick(s)", ticks);
                break;
            }

            std::thread::sleep(self.config.interval);
        }

        Ok(())
    }

    /// Get the monitor configuration
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }
}
