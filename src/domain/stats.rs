//! Aggregate statistics domain types.
//!
//! DTOs returned by the read-side analytics. Every query wraps its payload in
//! [`Report`], so an empty lookback window is a value, not an error.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::horizon::Horizon;
use super::id::EventId;
use super::outcome::Outcome;

/// Result of an analytics query: either data or an explicit "no data" marker.
#[derive(Debug, Clone, PartialEq)]
pub enum Report<T> {
    NoData,
    Data(T),
}

impl<T> Report<T> {
    #[must_use]
    pub fn has_data(&self) -> bool {
        matches!(self, Self::Data(_))
    }

    #[must_use]
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Data(data) => Some(data),
            Self::NoData => None,
        }
    }

    #[must_use]
    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Data(data) => Some(data),
            Self::NoData => None,
        }
    }
}

impl<T> Report<Vec<T>> {
    /// Wrap a list, mapping an empty list to [`Report::NoData`].
    #[must_use]
    pub fn from_rows(rows: Vec<T>) -> Self {
        if rows.is_empty() {
            Self::NoData
        } else {
            Self::Data(rows)
        }
    }
}

/// Outcome counts and averages for a group of events.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct OutcomeStats {
    pub sample_size: usize,
    pub wins: usize,
    pub losses: usize,
    pub neutrals: usize,
    /// Percentage of the sample labelled win.
    pub win_rate: f64,
    pub avg_change: f64,
    pub avg_score: f64,
    /// Mean momentum over events that have one.
    pub avg_momentum: Option<f64>,
}

/// Stated confidence versus observed accuracy for one confidence bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalibrationBucket {
    /// Human label, e.g. `0.8-0.9`.
    pub range: String,
    pub lower: f64,
    pub upper: f64,
    pub predictions: usize,
    pub correct: usize,
    pub actual_accuracy: f64,
    /// Bucket midpoint as a percentage.
    pub expected_accuracy: f64,
    /// `|actual - expected|` in percentage points.
    pub calibration_error: f64,
}

/// Trade results grouped by exit reason.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExitReasonStats {
    pub reason: String,
    pub count: usize,
    pub win_rate: f64,
    pub avg_pnl: f64,
    pub avg_hold_hours: f64,
    pub best: f64,
    pub worst: f64,
}

/// Trades grouped by how long they were held.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoldDurationBucket {
    pub label: &'static str,
    pub lower_hours: f64,
    /// `None` for the open-ended top bucket.
    pub upper_hours: Option<f64>,
    pub count: usize,
    pub wins: usize,
    pub avg_pnl: f64,
}

/// Outcomes grouped by the UTC hour of the baseline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourOfDayStats {
    pub hour: u32,
    pub sample_size: usize,
    pub wins: usize,
    pub win_rate: f64,
    pub avg_score: f64,
}

/// Counts from one tracker tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TickSummary {
    /// Due items considered across all horizons.
    pub due: usize,
    /// Horizons written by this tick.
    pub recorded: usize,
    /// Items another writer had already recorded.
    pub already_recorded: usize,
    /// Items skipped because no value could be fetched in time.
    pub unavailable: usize,
    /// Items whose write failed.
    pub failed: usize,
}

/// Key horizon fields of a recent event, for listings and exports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentOutcome {
    pub id: EventId,
    pub ticker: String,
    pub category: String,
    pub source: String,
    pub label: Option<String>,
    pub baseline_value: f64,
    pub baseline_at: DateTime<Utc>,
    pub horizons: Vec<HorizonSnapshot>,
    pub momentum_score: Option<f64>,
    pub final_outcome: Option<Outcome>,
    pub final_score: Option<f64>,
}

/// One observed horizon inside a [`RecentOutcome`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HorizonSnapshot {
    pub horizon: Horizon,
    pub change_pct: f64,
    pub outcome: Outcome,
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_rows_are_no_data() {
        let report: Report<Vec<u8>> = Report::from_rows(Vec::new());
        assert!(!report.has_data());
        assert!(report.data().is_none());
    }

    #[test]
    fn rows_are_data() {
        let report = Report::from_rows(vec![1, 2]);
        assert!(report.has_data());
        assert_eq!(report.into_data(), Some(vec![1, 2]));
    }
}
