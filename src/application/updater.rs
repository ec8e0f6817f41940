//! Horizon observation updates.
//!
//! Classifies a freshly fetched value against the stored baseline and
//! commits the horizon exactly once. Transient storage failures are retried
//! with exponential backoff; validation failures are returned immediately.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::domain::error::ValidationError;
use crate::domain::event::ObservationResult;
use crate::domain::horizon::Horizon;
use crate::domain::id::EventId;
use crate::error::Result;
use crate::port::outbound::store::{CommitOutcome, EventStore};

/// Bounded retry schedule for storage writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts after the first failure.
    pub retries: u32,
    /// Delay before the first retry; doubled on each subsequent one.
    pub backoff: Duration,
}

impl RetryPolicy {
    /// No retries at all.
    pub const NONE: Self = Self {
        retries: 0,
        backoff: Duration::ZERO,
    };

    #[must_use]
    pub const fn new(retries: u32, backoff: Duration) -> Self {
        Self { retries, backoff }
    }

    /// Delay before retry number `attempt` (zero-based).
    #[must_use]
    pub fn delay(&self, attempt: u32) -> Duration {
        self.backoff.saturating_mul(1u32 << attempt.min(16))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(200))
    }
}

/// Writes horizon observations.
pub struct ObservationUpdater {
    store: Arc<dyn EventStore>,
    retry: RetryPolicy,
}

impl ObservationUpdater {
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self {
            store,
            retry: RetryPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Record `observed_value` for `horizon` of `event_id`.
    ///
    /// Calling this again for an already observed horizon returns the stored
    /// result with `already_recorded = true` and writes nothing.
    ///
    /// Blocks (sleeping between retries); async callers should run it on a
    /// blocking thread.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidObservation`] for non-finite or
    /// non-positive values, [`ValidationError::UnknownEvent`] for unknown ids,
    /// and a storage error once retries are exhausted.
    pub fn update(
        &self,
        event_id: &EventId,
        horizon: Horizon,
        observed_value: f64,
    ) -> Result<ObservationResult> {
        self.update_at(event_id, horizon, observed_value, Utc::now())
    }

    /// Like [`update`](Self::update), but parses the horizon key first.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownHorizon`] for keys outside the
    /// fixed set, otherwise as [`update`](Self::update).
    pub fn update_key(
        &self,
        event_id: &EventId,
        horizon: &str,
        observed_value: f64,
    ) -> Result<ObservationResult> {
        let horizon: Horizon = horizon.parse()?;
        self.update(event_id, horizon, observed_value)
    }

    /// [`update`](Self::update) with an explicit clock.
    ///
    /// # Errors
    ///
    /// See [`update`](Self::update).
    pub fn update_at(
        &self,
        event_id: &EventId,
        horizon: Horizon,
        observed_value: f64,
        now: DateTime<Utc>,
    ) -> Result<ObservationResult> {
        if !observed_value.is_finite() || observed_value <= 0.0 {
            return Err(ValidationError::InvalidObservation {
                value: observed_value,
            }
            .into());
        }

        let mut attempt = 0;
        let outcome = loop {
            match self
                .store
                .commit_observation(event_id, horizon, observed_value, now)
            {
                Ok(outcome) => break outcome,
                Err(e) if e.is_retryable() && attempt < self.retry.retries => {
                    let delay = self.retry.delay(attempt);
                    warn!(
                        event_id = %event_id,
                        horizon = %horizon,
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Observation write failed, retrying"
                    );
                    std::thread::sleep(delay);
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        };

        let result = match outcome {
            CommitOutcome::Committed(obs) => {
                info!(
                    event_id = %event_id,
                    horizon = %horizon,
                    change_pct = obs.change_pct,
                    outcome = %obs.outcome,
                    score = obs.score,
                    "Recorded observation"
                );
                ObservationResult::from_observation(event_id.clone(), horizon, &obs, false)
            }
            CommitOutcome::AlreadyObserved(obs) => {
                debug!(event_id = %event_id, horizon = %horizon, "Horizon already recorded");
                ObservationResult::from_observation(event_id.clone(), horizon, &obs, true)
            }
        };

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::registry::EventRegistry;
    use crate::domain::event::{DueItem, NewEvent, TrackedEvent, TradeExit};
    use crate::domain::outcome::Outcome;
    use crate::error::Error;
    use crate::port::outbound::store::{EventFilter, UpsertOutcome};
    use crate::testkit::store::memory_store;
    use approx::assert_relative_eq;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn seeded(baseline: f64) -> (ObservationUpdater, EventId) {
        let store = memory_store();
        let id = EventRegistry::new(store.clone())
            .record(NewEvent::new("AAPL", "breakout", baseline))
            .unwrap();
        (ObservationUpdater::new(store), id)
    }

    #[test]
    fn thirty_minute_win() {
        let (updater, id) = seeded(100.0);
        let result = updater.update(&id, Horizon::M30, 103.5).unwrap();
        assert_eq!(result.outcome, Outcome::Win);
        assert_relative_eq!(result.change_pct, 3.5, epsilon = 1e-9);
        assert_relative_eq!(result.score, 0.594, epsilon = 1e-3);
        assert!(!result.already_recorded);
    }

    #[test]
    fn second_update_returns_first_result() {
        let (updater, id) = seeded(100.0);
        let first = updater.update(&id, Horizon::H1, 95.0).unwrap();
        let second = updater.update(&id, Horizon::H1, 120.0).unwrap();
        assert!(second.already_recorded);
        assert_eq!(first.change_pct, second.change_pct);
        assert_eq!(first.outcome, second.outcome);
        assert_eq!(first.score, second.score);
    }

    #[test]
    fn rejects_invalid_values_and_keys() {
        let (updater, id) = seeded(100.0);
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                updater.update(&id, Horizon::H1, bad),
                Err(Error::Validation(ValidationError::InvalidObservation { .. }))
            ));
        }
        assert!(matches!(
            updater.update_key(&id, "2h", 101.0),
            Err(Error::Validation(ValidationError::UnknownHorizon(_)))
        ));
        assert!(updater.update_key(&id, "4H", 101.0).is_ok());
    }

    #[test]
    fn unknown_event_is_not_retried() {
        let (updater, _) = seeded(100.0);
        assert!(matches!(
            updater.update(&EventId::new("nope"), Horizon::H1, 101.0),
            Err(Error::Validation(ValidationError::UnknownEvent(_)))
        ));
    }

    #[test]
    fn backoff_doubles() {
        let policy = RetryPolicy::new(3, Duration::from_millis(100));
        assert_eq!(policy.delay(0), Duration::from_millis(100));
        assert_eq!(policy.delay(1), Duration::from_millis(200));
        assert_eq!(policy.delay(2), Duration::from_millis(400));
    }

    /// Fails commits a fixed number of times, then delegates.
    struct FlakyStore {
        inner: Arc<dyn EventStore>,
        failures_left: AtomicU32,
    }

    impl EventStore for FlakyStore {
        fn upsert(&self, id: &EventId, event: &NewEvent, now: DateTime<Utc>) -> Result<UpsertOutcome> {
            self.inner.upsert(id, event, now)
        }
        fn get(&self, id: &EventId) -> Result<Option<TrackedEvent>> {
            self.inner.get(id)
        }
        fn commit_observation(
            &self,
            id: &EventId,
            horizon: Horizon,
            observed_value: f64,
            now: DateTime<Utc>,
        ) -> Result<CommitOutcome> {
            let left = self.failures_left.load(Ordering::SeqCst);
            if left > 0 {
                self.failures_left.store(left - 1, Ordering::SeqCst);
                return Err(Error::Storage("database is locked".into()));
            }
            self.inner.commit_observation(id, horizon, observed_value, now)
        }
        fn annotate_prediction(
            &self,
            id: &EventId,
            confidence: f64,
            direction_correct: bool,
            now: DateTime<Utc>,
        ) -> Result<bool> {
            self.inner.annotate_prediction(id, confidence, direction_correct, now)
        }
        fn record_exit(&self, id: &EventId, exit: &TradeExit, now: DateTime<Utc>) -> Result<bool> {
            self.inner.record_exit(id, exit, now)
        }
        fn due(
            &self,
            horizon: Horizon,
            now: DateTime<Utc>,
            max_age: chrono::Duration,
            limit: Option<usize>,
        ) -> Result<Vec<DueItem>> {
            self.inner.due(horizon, now, max_age, limit)
        }
        fn load_window(&self, since: DateTime<Utc>, filter: &EventFilter) -> Result<Vec<TrackedEvent>> {
            self.inner.load_window(since, filter)
        }
        fn recent(&self, since: DateTime<Utc>, limit: usize) -> Result<Vec<TrackedEvent>> {
            self.inner.recent(since, limit)
        }
        fn prune_before(&self, cutoff: DateTime<Utc>) -> Result<usize> {
            self.inner.prune_before(cutoff)
        }
    }

    fn flaky(failures: u32) -> (Arc<FlakyStore>, EventId) {
        let inner = memory_store();
        let id = EventRegistry::new(inner.clone())
            .record(NewEvent::new("AAPL", "breakout", 100.0))
            .unwrap();
        let store = Arc::new(FlakyStore {
            inner,
            failures_left: AtomicU32::new(failures),
        });
        (store, id)
    }

    #[test]
    fn transient_storage_errors_are_retried() {
        let (store, id) = flaky(2);
        let updater = ObservationUpdater::new(store)
            .with_retry(RetryPolicy::new(3, Duration::from_millis(1)));
        let result = updater.update(&id, Horizon::H4, 104.0).unwrap();
        assert_eq!(result.outcome, Outcome::Win);
    }

    #[test]
    fn exhausted_retries_surface_storage_error() {
        let (store, id) = flaky(5);
        let updater = ObservationUpdater::new(store)
            .with_retry(RetryPolicy::new(2, Duration::from_millis(1)));
        assert!(matches!(
            updater.update(&id, Horizon::H4, 104.0),
            Err(Error::Storage(_))
        ));
    }
}
