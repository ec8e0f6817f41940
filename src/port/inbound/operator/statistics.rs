//! Read-side use-cases: statistics, export, and pruning.

use crate::domain::horizon::Horizon;
use crate::domain::stats::{
    CalibrationBucket, ExitReasonStats, HoldDurationBucket, HourOfDayStats, OutcomeStats,
    RecentOutcome, Report,
};
use crate::error::Result;

use super::session::SessionRequest;

/// Statistics use-cases for operator-facing adapters.
pub trait StatisticsOperator: Send + Sync {
    /// Outcome statistics at `horizon` for one category.
    fn category_stats(
        &self,
        request: &SessionRequest,
        category: &str,
        days: u32,
        horizon: Horizon,
    ) -> Result<Report<OutcomeStats>>;

    /// Final-outcome statistics for one ticker.
    fn ticker_stats(
        &self,
        request: &SessionRequest,
        ticker: &str,
        days: u32,
    ) -> Result<Report<OutcomeStats>>;

    /// Stated confidence versus observed accuracy.
    fn confidence_calibration(
        &self,
        request: &SessionRequest,
        days: u32,
        bucket_width: f64,
    ) -> Result<Report<Vec<CalibrationBucket>>>;

    /// Trade results grouped by exit reason.
    fn exit_reason_breakdown(
        &self,
        request: &SessionRequest,
        days: u32,
    ) -> Result<Report<Vec<ExitReasonStats>>>;

    /// Trades bucketed by hold duration.
    fn hold_duration_distribution(
        &self,
        request: &SessionRequest,
        days: u32,
    ) -> Result<Report<Vec<HoldDurationBucket>>>;

    /// Outcomes at `horizon` grouped by UTC hour of the baseline.
    fn time_of_day_stats(
        &self,
        request: &SessionRequest,
        days: u32,
        horizon: Horizon,
    ) -> Result<Report<Vec<HourOfDayStats>>>;

    /// The `limit` most recent events by baseline time.
    fn recent_outcomes(
        &self,
        request: &SessionRequest,
        limit: usize,
        days: u32,
    ) -> Result<Report<Vec<RecentOutcome>>>;

    /// Export the `limit` most recent events as JSON lines.
    fn export_recent_jsonl(
        &self,
        request: &SessionRequest,
        limit: usize,
        days: u32,
    ) -> Result<String>;

    /// Delete events older than `days` days and return how many went.
    fn prune_older_than(&self, request: &SessionRequest, days: u32) -> Result<usize>;
}
