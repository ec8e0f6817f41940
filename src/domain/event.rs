//! Tracked events and their per-horizon observations.
//!
//! A [`TrackedEvent`] is created with only its baseline populated. Each
//! horizon is later filled exactly once with a [`HorizonObservation`];
//! composites are pure functions of whatever has been observed.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::error::ValidationError;
use super::horizon::Horizon;
use super::id::EventId;
use super::outcome::{change_pct, classify, Outcome};
use super::score::{final_score, momentum, FinalScore};

/// Default source tag when a producer does not name one.
pub const DEFAULT_SOURCE: &str = "manual";

/// Request to create (or upsert) a tracked event.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub id: Option<EventId>,
    pub ticker: String,
    pub category: String,
    pub source: String,
    pub label: Option<String>,
    pub baseline_value: f64,
    /// Explicit baseline time. `None` means "now" for new rows and
    /// "keep the stored time" for upserts.
    pub baseline_at: Option<DateTime<Utc>>,
}

impl NewEvent {
    #[must_use]
    pub fn new(ticker: impl Into<String>, category: impl Into<String>, baseline_value: f64) -> Self {
        Self {
            id: None,
            ticker: ticker.into(),
            category: category.into(),
            source: DEFAULT_SOURCE.to_string(),
            label: None,
            baseline_value,
            baseline_at: None,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<EventId>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_baseline_at(mut self, at: DateTime<Utc>) -> Self {
        self.baseline_at = Some(at);
        self
    }

    /// Check producer-facing invariants.
    ///
    /// # Errors
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.baseline_value.is_finite() || self.baseline_value <= 0.0 {
            return Err(ValidationError::NonPositiveBaseline {
                value: self.baseline_value,
            });
        }
        if self.ticker.trim().is_empty() {
            return Err(ValidationError::EmptyTicker);
        }
        if self.category.trim().is_empty() {
            return Err(ValidationError::EmptyTag { field: "category" });
        }
        if self.source.trim().is_empty() {
            return Err(ValidationError::EmptyTag { field: "source" });
        }
        Ok(())
    }

    /// Canonical ticker form used for storage and grouping.
    #[must_use]
    pub fn normalized_ticker(&self) -> String {
        self.ticker.trim().to_ascii_uppercase()
    }
}

/// The four fields written together for one horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HorizonObservation {
    pub observed_value: f64,
    pub change_pct: f64,
    pub outcome: Outcome,
    pub score: f64,
}

impl HorizonObservation {
    /// Classify `observed` against `baseline`.
    #[must_use]
    pub fn measure(baseline: f64, observed: f64) -> Self {
        let change = change_pct(baseline, observed);
        let classification = classify(change);
        Self {
            observed_value: observed,
            change_pct: change,
            outcome: classification.outcome,
            score: classification.score,
        }
    }
}

/// Trade exit details attached by an external position tracker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeExit {
    pub reason: String,
    pub pnl_pct: f64,
    pub hold_duration_hours: f64,
}

impl TradeExit {
    /// # Errors
    /// Rejects blank reasons and negative or non-finite hold durations.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.reason.trim().is_empty() {
            return Err(ValidationError::EmptyTag {
                field: "exit_reason",
            });
        }
        if !self.hold_duration_hours.is_finite() || self.hold_duration_hours < 0.0 {
            return Err(ValidationError::InvalidHoldDuration {
                value: self.hold_duration_hours,
            });
        }
        Ok(())
    }
}

/// Composites recomputed after each horizon write.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DerivedScores {
    pub momentum_score: Option<f64>,
    pub final_score: Option<FinalScore>,
}

/// A tracked predictive event as persisted.
#[derive(Debug, Clone)]
pub struct TrackedEvent {
    pub id: EventId,
    pub ticker: String,
    pub category: String,
    pub source: String,
    pub label: Option<String>,
    pub baseline_value: f64,
    pub baseline_at: DateTime<Utc>,
    pub observations: BTreeMap<Horizon, HorizonObservation>,
    pub momentum_score: Option<f64>,
    pub final_outcome: Option<Outcome>,
    pub final_score: Option<f64>,
    pub confidence: Option<f64>,
    pub direction_correct: Option<bool>,
    pub exit: Option<TradeExit>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TrackedEvent {
    #[must_use]
    pub fn observation(&self, horizon: Horizon) -> Option<&HorizonObservation> {
        self.observations.get(&horizon)
    }

    #[must_use]
    pub fn is_observed(&self, horizon: Horizon) -> bool {
        self.observations.contains_key(&horizon)
    }

    /// Time elapsed since the baseline at `now`.
    #[must_use]
    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        now - self.baseline_at
    }

    /// Whether `horizon` is due at `now` given a maximum tracking age.
    #[must_use]
    pub fn is_due(&self, horizon: Horizon, now: DateTime<Utc>, max_age: Duration) -> bool {
        let elapsed = self.elapsed(now);
        !self.is_observed(horizon) && elapsed >= horizon.duration() && elapsed <= max_age
    }

    /// Recompute composites from the current observations.
    ///
    /// Momentum exists once 30m is observed; the final blend once 1d is.
    #[must_use]
    pub fn derive_scores(&self) -> DerivedScores {
        let momentum_score = self.observation(Horizon::MOMENTUM).map(|m30| {
            let c15 = self.observation(Horizon::M15).map(|o| o.change_pct);
            momentum(c15, m30.change_pct)
        });

        let final_score = if self.is_observed(Horizon::FINAL) {
            final_score(
                self.observations
                    .iter()
                    .map(|(h, o)| (*h, o.outcome, o.score)),
            )
        } else {
            None
        };

        DerivedScores {
            momentum_score,
            final_score,
        }
    }

    /// Apply an observation and refresh composites in memory.
    ///
    /// Returns `false` (and leaves the event untouched) if the horizon was
    /// already observed.
    pub fn apply(&mut self, horizon: Horizon, observation: HorizonObservation) -> bool {
        if self.is_observed(horizon) {
            return false;
        }
        self.observations.insert(horizon, observation);
        let derived = self.derive_scores();
        if let Some(m) = derived.momentum_score {
            self.momentum_score = Some(m);
        }
        if let Some(f) = derived.final_score {
            self.final_outcome = Some(f.outcome);
            self.final_score = Some(f.score);
        }
        true
    }
}

/// Result returned by an observation update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObservationResult {
    pub event_id: EventId,
    pub horizon: Horizon,
    pub change_pct: f64,
    pub outcome: Outcome,
    pub score: f64,
    /// True when the horizon was already populated and nothing was written.
    pub already_recorded: bool,
}

impl ObservationResult {
    #[must_use]
    pub fn from_observation(
        event_id: EventId,
        horizon: Horizon,
        observation: &HorizonObservation,
        already_recorded: bool,
    ) -> Self {
        Self {
            event_id,
            horizon,
            change_pct: observation.change_pct,
            outcome: observation.outcome,
            score: observation.score,
            already_recorded,
        }
    }
}

/// An (event, horizon) pair awaiting observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DueItem {
    pub event_id: EventId,
    pub ticker: String,
    pub baseline_value: f64,
    pub baseline_at: DateTime<Utc>,
    pub horizon: Horizon,
}
