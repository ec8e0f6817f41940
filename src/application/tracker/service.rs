//! Periodic outcome tracker.
//!
//! On every tick, for each horizon, pulls the due (event, horizon) pairs,
//! fetches a current value per ticker with a timeout, and records it.
//! Individual failures are logged and leave the horizon due for the next
//! tick; the loop itself never stops on an item error.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures_util::stream::{self, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::application::scheduler::TimeframeScheduler;
use crate::application::updater::ObservationUpdater;
use crate::domain::event::DueItem;
use crate::domain::horizon::Horizon;
use crate::domain::stats::TickSummary;
use crate::error::{Error, Result};
use crate::port::outbound::price::PriceProvider;
use crate::port::outbound::store::EventStore;

use super::config::TrackerConfig;

/// Handle to control a running tracker.
pub struct TrackerHandle {
    shutdown_tx: mpsc::Sender<()>,
    task: JoinHandle<()>,
}

impl TrackerHandle {
    /// Signal the tracker to stop and wait for the current tick to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
        if let Err(e) = self.task.await {
            warn!(error = %e, "Tracker task ended abnormally");
        }
    }
}

enum ItemOutcome {
    Recorded,
    AlreadyRecorded,
    Unavailable,
    Failed,
}

fn tally(summary: &mut TickSummary, outcome: &ItemOutcome) {
    match outcome {
        ItemOutcome::Recorded => summary.recorded += 1,
        ItemOutcome::AlreadyRecorded => summary.already_recorded += 1,
        ItemOutcome::Unavailable => summary.unavailable += 1,
        ItemOutcome::Failed => summary.failed += 1,
    }
}

/// Drives observations for due events.
pub struct Tracker {
    scheduler: Arc<TimeframeScheduler>,
    updater: Arc<ObservationUpdater>,
    prices: Arc<dyn PriceProvider>,
    config: TrackerConfig,
}

impl Tracker {
    pub fn new(
        store: Arc<dyn EventStore>,
        prices: Arc<dyn PriceProvider>,
        config: TrackerConfig,
    ) -> Self {
        let scheduler = TimeframeScheduler::new(store.clone()).with_batch_limit(config.batch_limit);
        let updater = ObservationUpdater::new(store).with_retry(config.retry_policy());
        Self {
            scheduler: Arc::new(scheduler),
            updater: Arc::new(updater),
            prices,
            config,
        }
    }

    /// Run a single tick against the current time.
    pub async fn tick(&self) -> TickSummary {
        self.tick_at(Utc::now()).await
    }

    /// Run a single tick treating `now` as the current time.
    pub async fn tick_at(&self, now: DateTime<Utc>) -> TickSummary {
        let mut summary = TickSummary::default();

        for horizon in Horizon::ALL {
            let due = match self.due(horizon, now).await {
                Ok(due) => due,
                Err(e) => {
                    warn!(horizon = %horizon, error = %e, "Failed to load due events");
                    continue;
                }
            };
            if due.is_empty() {
                continue;
            }

            debug!(horizon = %horizon, due = due.len(), "Processing due events");
            summary.due += due.len();

            let outcomes: Vec<ItemOutcome> = stream::iter(due)
                .map(|item| self.process(item))
                .buffer_unordered(self.config.max_concurrency.max(1))
                .collect()
                .await;

            for outcome in &outcomes {
                tally(&mut summary, outcome);
            }
        }

        if summary.due > 0 {
            info!(
                due = summary.due,
                recorded = summary.recorded,
                already_recorded = summary.already_recorded,
                unavailable = summary.unavailable,
                failed = summary.failed,
                "Tracker tick complete"
            );
        }

        summary
    }

    async fn due(&self, horizon: Horizon, now: DateTime<Utc>) -> Result<Vec<DueItem>> {
        let scheduler = self.scheduler.clone();
        let max_age = self.config.max_age();
        tokio::task::spawn_blocking(move || scheduler.get_due_at(horizon, max_age, now))
            .await
            .map_err(|e| Error::Storage(e.to_string()))?
    }

    async fn process(&self, item: DueItem) -> ItemOutcome {
        let fetch = tokio::time::timeout(
            self.config.fetch_timeout(),
            self.prices.current_value(&item.ticker),
        )
        .await;

        let value = match fetch {
            Ok(Ok(Some(value))) => value,
            Ok(Ok(None)) => {
                debug!(
                    event_id = %item.event_id,
                    horizon = %item.horizon,
                    ticker = %item.ticker,
                    "No value available"
                );
                return ItemOutcome::Unavailable;
            }
            Ok(Err(e)) => {
                let e = Error::DataUnavailable {
                    ticker: item.ticker.clone(),
                    reason: e.to_string(),
                };
                warn!(
                    event_id = %item.event_id,
                    horizon = %item.horizon,
                    provider = self.prices.name(),
                    error = %e,
                    "Price fetch failed"
                );
                return ItemOutcome::Unavailable;
            }
            Err(_) => {
                warn!(
                    event_id = %item.event_id,
                    horizon = %item.horizon,
                    ticker = %item.ticker,
                    timeout_ms = self.config.fetch_timeout_ms,
                    "Price fetch timed out"
                );
                return ItemOutcome::Unavailable;
            }
        };

        let updater = self.updater.clone();
        let event_id = item.event_id.clone();
        let horizon = item.horizon;
        let written =
            tokio::task::spawn_blocking(move || updater.update(&event_id, horizon, value)).await;

        match written {
            Ok(Ok(result)) if result.already_recorded => ItemOutcome::AlreadyRecorded,
            Ok(Ok(_)) => ItemOutcome::Recorded,
            Ok(Err(e)) => {
                warn!(
                    event_id = %item.event_id,
                    horizon = %item.horizon,
                    value,
                    error = %e,
                    "Failed to record observation"
                );
                ItemOutcome::Failed
            }
            Err(e) => {
                warn!(
                    event_id = %item.event_id,
                    horizon = %item.horizon,
                    error = %e,
                    "Observation task panicked"
                );
                ItemOutcome::Failed
            }
        }
    }

    /// Start ticking in the background.
    ///
    /// The first tick runs immediately.
    pub fn start(self) -> TrackerHandle {
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
        let interval = self.config.interval();

        let task = tokio::spawn(async move {
            let mut timer = tokio::time::interval(interval);
            timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

            info!(
                interval_secs = interval.as_secs(),
                provider = self.prices.name(),
                "Tracker started"
            );

            loop {
                tokio::select! {
                    _ = shutdown_rx.recv() => {
                        info!("Tracker shutting down");
                        break;
                    }
                    _ = timer.tick() => {
                        self.tick().await;
                    }
                }
            }
        });

        TrackerHandle { shutdown_tx, task }
    }
}
