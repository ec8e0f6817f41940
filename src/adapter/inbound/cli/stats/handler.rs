//! Handler for the `stats` command group.
//!
//! Loads each report through the aggregation engine, then prints it as JSON
//! or as a table. An empty window prints a note rather than failing.

use serde::Serialize;
use serde_json::Value;

use crate::adapter::inbound::cli::command::StatsCommand;
use crate::adapter::inbound::cli::operator::operator;
use crate::adapter::inbound::cli::output;
use crate::domain::stats::Report;
use crate::error::Result;
use crate::port::inbound::operator::session::SessionRequest;

use super::format;
use super::json::{outcome_stats_to_json, report_to_json};

/// Emit `report` as JSON, print the note for `NoData`, or hand the data to
/// `print`.
fn emit<T: Serialize>(command: &str, report: &Report<T>, empty: &str, print: impl FnOnce(&T)) {
    emit_with(command, report, empty, report_to_json, print);
}

fn emit_with<T>(
    command: &str,
    report: &Report<T>,
    empty: &str,
    to_json: fn(&str, &Report<T>) -> Value,
    print: impl FnOnce(&T),
) {
    if output::is_json() {
        output::json_output(to_json(command, report));
        return;
    }
    match report.data() {
        Some(data) => print(data),
        None => output::note(empty),
    }
}

/// Execute a `stats` subcommand.
pub fn execute(request: &SessionRequest, command: &StatsCommand) -> Result<()> {
    if output::is_quiet() && !output::is_json() {
        return Ok(());
    }

    let operator = operator()?;
    match command {
        StatsCommand::Category {
            category,
            days,
            horizon,
        } => {
            let report = operator.category_stats(request, category, *days, *horizon)?;
            emit_with(
                "stats.category",
                &report,
                &format!("No {category} events observed at {horizon} in the last {days} days"),
                outcome_stats_to_json,
                |stats| {
                    format::print_outcome_stats(
                        &format!("{category} at {horizon}, last {days} days"),
                        stats,
                    );
                },
            );
        }
        StatsCommand::Ticker { ticker, days } => {
            let report = operator.ticker_stats(request, ticker, *days)?;
            emit_with(
                "stats.ticker",
                &report,
                &format!("No final outcomes for {ticker} in the last {days} days"),
                outcome_stats_to_json,
                |stats| {
                    format::print_outcome_stats(
                        &format!("{}, last {days} days", ticker.to_ascii_uppercase()),
                        stats,
                    );
                },
            );
        }
        StatsCommand::Calibration { days, bucket_width } => {
            let report = operator.confidence_calibration(request, *days, *bucket_width)?;
            emit(
                "stats.calibration",
                &report,
                "No annotated predictions in the window",
                |buckets| format::print_calibration(buckets),
            );
        }
        StatsCommand::Exits { days } => {
            let report = operator.exit_reason_breakdown(request, *days)?;
            emit(
                "stats.exits",
                &report,
                "No trade exits in the window",
                |rows| format::print_exits(rows),
            );
        }
        StatsCommand::Holds { days } => {
            let report = operator.hold_duration_distribution(request, *days)?;
            emit(
                "stats.holds",
                &report,
                "No trade exits in the window",
                |buckets| format::print_holds(buckets),
            );
        }
        StatsCommand::Hours { days, horizon } => {
            let report = operator.time_of_day_stats(request, *days, *horizon)?;
            emit(
                "stats.hours",
                &report,
                &format!("No events observed at {horizon} in the window"),
                |rows| format::print_hours(*horizon, rows),
            );
        }
        StatsCommand::Recent { limit, days } => {
            let report = operator.recent_outcomes(request, *limit, *days)?;
            emit(
                "stats.recent",
                &report,
                "No events in the window",
                |rows| format::print_recent(rows),
            );
        }
    }
    Ok(())
}
