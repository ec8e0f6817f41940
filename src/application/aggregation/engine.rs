//! Aggregation queries over tracked events.
//!
//! Every query covers events whose baseline falls within the last `days`
//! days and returns a [`Report`]; an empty window is [`Report::NoData`],
//! never an error.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::domain::event::TrackedEvent;
use crate::domain::horizon::Horizon;
use crate::domain::stats::{
    CalibrationBucket, ExitReasonStats, HoldDurationBucket, HourOfDayStats, OutcomeStats,
    RecentOutcome, Report,
};
use crate::domain::window::lookback_start;
use crate::error::Result;
use crate::port::outbound::export::OutcomeSink;
use crate::port::outbound::store::{EventFilter, EventStore};

use super::compute;

/// Aggregation queries and housekeeping.
pub struct AggregationEngine {
    store: Arc<dyn EventStore>,
}

/// Saturates for windows reaching past the representable date range.
fn window_start(days: u32, now: DateTime<Utc>) -> DateTime<Utc> {
    lookback_start(now, days)
}

fn report<T>(value: Option<T>) -> Report<T> {
    value.map_or(Report::NoData, Report::Data)
}

impl AggregationEngine {
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self { store }
    }

    /// Outcome statistics at `horizon` for one category.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the window cannot be loaded.
    pub fn category_stats(
        &self,
        category: &str,
        days: u32,
        horizon: Horizon,
    ) -> Result<Report<OutcomeStats>> {
        let events = self.store.load_window(
            window_start(days, Utc::now()),
            &EventFilter::category(category.trim()),
        )?;
        Ok(report(compute::horizon_stats(&events, horizon)))
    }

    /// Final-outcome statistics for one ticker.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the window cannot be loaded.
    pub fn ticker_stats(&self, ticker: &str, days: u32) -> Result<Report<OutcomeStats>> {
        let filter = EventFilter::ticker(ticker.trim().to_ascii_uppercase());
        let events = self
            .store
            .load_window(window_start(days, Utc::now()), &filter)?;
        Ok(report(compute::final_stats(&events)))
    }

    /// Stated confidence versus observed accuracy.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bucket width outside `(0, 0.5]`, or a
    /// storage error if the window cannot be loaded.
    pub fn confidence_calibration(
        &self,
        days: u32,
        bucket_width: f64,
    ) -> Result<Report<Vec<CalibrationBucket>>> {
        let events = self.all_since(days)?;
        let buckets = compute::calibration(&events, bucket_width)?;
        Ok(Report::from_rows(buckets))
    }

    /// Trade results grouped by exit reason, most frequent first.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the window cannot be loaded.
    pub fn exit_reason_breakdown(&self, days: u32) -> Result<Report<Vec<ExitReasonStats>>> {
        let events = self.all_since(days)?;
        Ok(Report::from_rows(compute::exit_breakdown(&events)))
    }

    /// Trades bucketed by hold duration.
    ///
    /// All buckets are reported once any trade exists in the window.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the window cannot be loaded.
    pub fn hold_duration_distribution(
        &self,
        days: u32,
    ) -> Result<Report<Vec<HoldDurationBucket>>> {
        let events = self.all_since(days)?;
        if events.iter().all(|e| e.exit.is_none()) {
            return Ok(Report::NoData);
        }
        Ok(Report::Data(compute::hold_distribution(&events)))
    }

    /// Outcomes at `horizon` grouped by UTC hour of the baseline.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the window cannot be loaded.
    pub fn time_of_day_stats(
        &self,
        days: u32,
        horizon: Horizon,
    ) -> Result<Report<Vec<HourOfDayStats>>> {
        let events = self.all_since(days)?;
        Ok(Report::from_rows(compute::hour_of_day(&events, horizon)))
    }

    /// The `limit` most recent events by baseline time.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the query fails.
    pub fn recent_outcomes(&self, limit: usize, days: u32) -> Result<Report<Vec<RecentOutcome>>> {
        let events = self
            .store
            .recent(window_start(days, Utc::now()), limit)?;
        Ok(Report::from_rows(
            events.iter().map(RecentOutcome::from).collect(),
        ))
    }

    /// Hand the `limit` most recent outcomes to `sink`.
    ///
    /// Returns the number of outcomes written.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the query fails, or the sink's error if
    /// writing fails.
    pub fn export_recent(
        &self,
        limit: usize,
        days: u32,
        sink: &mut dyn OutcomeSink,
    ) -> Result<usize> {
        let outcomes = self
            .recent_outcomes(limit, days)?
            .into_data()
            .unwrap_or_default();
        let written = sink.write_outcomes(&outcomes)?;
        debug!(lines = written, "Exported recent outcomes");
        Ok(written)
    }

    /// Delete events whose baseline is older than `days` days.
    ///
    /// This is an explicit operator action; nothing in the tracking path
    /// deletes rows.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the delete fails.
    pub fn prune_older_than(&self, days: u32) -> Result<usize> {
        let cutoff = window_start(days, Utc::now());
        let deleted = self.store.prune_before(cutoff)?;
        info!(deleted, days, "Pruned tracked events");
        Ok(deleted)
    }

    fn all_since(&self, days: u32) -> Result<Vec<TrackedEvent>> {
        self.store
            .load_window(window_start(days, Utc::now()), &EventFilter::default())
    }
}
