//! Persistence port for tracked events.
//!
//! Implementations are synchronous; async callers run them on a blocking
//! thread. Every method touches at most one event row per transaction.

use chrono::{DateTime, Duration, Utc};

use crate::domain::event::{DueItem, HorizonObservation, NewEvent, TrackedEvent, TradeExit};
use crate::domain::horizon::Horizon;
use crate::domain::id::EventId;
use crate::error::Result;

/// Whether an upsert inserted a new row or refreshed an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

/// Result of attempting to fill one horizon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CommitOutcome {
    /// This call wrote the horizon.
    Committed(HorizonObservation),
    /// A previous call already wrote it; the stored value is returned.
    AlreadyObserved(HorizonObservation),
}

impl CommitOutcome {
    #[must_use]
    pub fn observation(&self) -> &HorizonObservation {
        match self {
            Self::Committed(obs) | Self::AlreadyObserved(obs) => obs,
        }
    }
}

/// Optional grouping filters for window loads.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub category: Option<String>,
    pub ticker: Option<String>,
    pub source: Option<String>,
}

impl EventFilter {
    #[must_use]
    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn ticker(ticker: impl Into<String>) -> Self {
        Self {
            ticker: Some(ticker.into()),
            ..Self::default()
        }
    }
}

/// Durable storage for tracked events.
pub trait EventStore: Send + Sync {
    /// Insert a new event or refresh baseline/metadata on an existing id.
    ///
    /// Horizon columns and composites are never modified.
    fn upsert(&self, id: &EventId, event: &NewEvent, now: DateTime<Utc>) -> Result<UpsertOutcome>;

    /// Load one event.
    fn get(&self, id: &EventId) -> Result<Option<TrackedEvent>>;

    /// Classify `observed_value` against the stored baseline and write the
    /// horizon plus refreshed composites, at most once per (event, horizon).
    ///
    /// Unknown ids fail with a validation error.
    fn commit_observation(
        &self,
        id: &EventId,
        horizon: Horizon,
        observed_value: f64,
        now: DateTime<Utc>,
    ) -> Result<CommitOutcome>;

    /// Attach confidence and direction correctness. Returns false for unknown ids.
    fn annotate_prediction(
        &self,
        id: &EventId,
        confidence: f64,
        direction_correct: bool,
        now: DateTime<Utc>,
    ) -> Result<bool>;

    /// Attach trade exit details. Returns false for unknown ids.
    fn record_exit(&self, id: &EventId, exit: &TradeExit, now: DateTime<Utc>) -> Result<bool>;

    /// Events whose `horizon` is unobserved with baseline age in
    /// `[horizon.duration(), max_age]`, oldest baseline first.
    fn due(
        &self,
        horizon: Horizon,
        now: DateTime<Utc>,
        max_age: Duration,
        limit: Option<usize>,
    ) -> Result<Vec<DueItem>>;

    /// Events with baseline at or after `since`, matching `filter`.
    fn load_window(&self, since: DateTime<Utc>, filter: &EventFilter) -> Result<Vec<TrackedEvent>>;

    /// Most recent events by baseline, newest first.
    fn recent(&self, since: DateTime<Utc>, limit: usize) -> Result<Vec<TrackedEvent>>;

    /// Delete events whose baseline is before `cutoff`. Returns the count.
    fn prune_before(&self, cutoff: DateTime<Utc>) -> Result<usize>;
}
