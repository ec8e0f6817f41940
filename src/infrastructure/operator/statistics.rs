//! Statistics operator implementation.

use crate::adapter::outbound::export::jsonl::JsonlSink;
use crate::domain::horizon::Horizon;
use crate::domain::stats::{
    CalibrationBucket, ExitReasonStats, HoldDurationBucket, HourOfDayStats, OutcomeStats,
    RecentOutcome, Report,
};
use crate::error::Result;
use crate::port::inbound::operator::session::SessionRequest;
use crate::port::inbound::operator::statistics::StatisticsOperator;

use super::{entry::Operator, shared};

impl StatisticsOperator for Operator {
    fn category_stats(
        &self,
        request: &SessionRequest,
        category: &str,
        days: u32,
        horizon: Horizon,
    ) -> Result<Report<OutcomeStats>> {
        let (_, services) = shared::open(request)?;
        services.aggregation.category_stats(category, days, horizon)
    }

    fn ticker_stats(
        &self,
        request: &SessionRequest,
        ticker: &str,
        days: u32,
    ) -> Result<Report<OutcomeStats>> {
        let (_, services) = shared::open(request)?;
        services.aggregation.ticker_stats(ticker, days)
    }

    fn confidence_calibration(
        &self,
        request: &SessionRequest,
        days: u32,
        bucket_width: f64,
    ) -> Result<Report<Vec<CalibrationBucket>>> {
        let (_, services) = shared::open(request)?;
        services.aggregation.confidence_calibration(days, bucket_width)
    }

    fn exit_reason_breakdown(
        &self,
        request: &SessionRequest,
        days: u32,
    ) -> Result<Report<Vec<ExitReasonStats>>> {
        let (_, services) = shared::open(request)?;
        services.aggregation.exit_reason_breakdown(days)
    }

    fn hold_duration_distribution(
        &self,
        request: &SessionRequest,
        days: u32,
    ) -> Result<Report<Vec<HoldDurationBucket>>> {
        let (_, services) = shared::open(request)?;
        services.aggregation.hold_duration_distribution(days)
    }

    fn time_of_day_stats(
        &self,
        request: &SessionRequest,
        days: u32,
        horizon: Horizon,
    ) -> Result<Report<Vec<HourOfDayStats>>> {
        let (_, services) = shared::open(request)?;
        services.aggregation.time_of_day_stats(days, horizon)
    }

    fn recent_outcomes(
        &self,
        request: &SessionRequest,
        limit: usize,
        days: u32,
    ) -> Result<Report<Vec<RecentOutcome>>> {
        let (_, services) = shared::open(request)?;
        services.aggregation.recent_outcomes(limit, days)
    }

    fn export_recent_jsonl(
        &self,
        request: &SessionRequest,
        limit: usize,
        days: u32,
    ) -> Result<String> {
        let (_, services) = shared::open(request)?;
        let mut sink = JsonlSink::new(Vec::new());
        services.aggregation.export_recent(limit, days, &mut sink)?;
        Ok(String::from_utf8_lossy(&sink.into_inner()).into_owned())
    }

    fn prune_older_than(&self, request: &SessionRequest, days: u32) -> Result<usize> {
        let (_, services) = shared::open(request)?;
        services.aggregation.prune_older_than(days)
    }
}
