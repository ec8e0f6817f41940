//! Human-readable tables for analytics output.

use crate::adapter::inbound::cli::output;
use crate::domain::horizon::Horizon;
use crate::domain::stats::{
    CalibrationBucket, ExitReasonStats, HoldDurationBucket, HourOfDayStats, OutcomeStats,
    RecentOutcome,
};

fn pct(value: f64) -> String {
    format!("{value:.1}%")
}

fn signed_pct(value: f64) -> String {
    output::signed(value, format!("{value:+.2}%"))
}

pub fn print_outcome_stats(title: &str, stats: &OutcomeStats) {
    output::section(title);
    output::field("Sample", stats.sample_size);
    output::field(
        "W / L / N",
        format!("{} / {} / {}", stats.wins, stats.losses, stats.neutrals),
    );
    output::field("Win rate", output::highlight(pct(stats.win_rate)));
    output::field("Avg change", signed_pct(stats.avg_change));
    output::field("Avg score", format!("{:.4}", stats.avg_score));
    if let Some(momentum) = stats.avg_momentum {
        output::field("Avg momentum", format!("{momentum:.4}"));
    }
}

pub fn print_calibration(buckets: &[CalibrationBucket]) {
    output::section("Confidence calibration");
    let widths = [10, 8, 8, 9, 9, 7];
    output::table_header(&[
        ("Range", widths[0]),
        ("Preds", widths[1]),
        ("Correct", widths[2]),
        ("Actual", widths[3]),
        ("Expected", widths[4]),
        ("Error", widths[5]),
    ]);
    for bucket in buckets {
        output::table_row(
            &[
                bucket.range.clone(),
                bucket.predictions.to_string(),
                bucket.correct.to_string(),
                pct(bucket.actual_accuracy),
                pct(bucket.expected_accuracy),
                format!("{:.1}", bucket.calibration_error),
            ],
            &widths,
        );
    }
}

pub fn print_exits(rows: &[ExitReasonStats]) {
    output::section("Exit reasons");
    let widths = [14, 6, 8, 9, 9, 9, 9];
    output::table_header(&[
        ("Reason", widths[0]),
        ("Count", widths[1]),
        ("Win %", widths[2]),
        ("Avg PnL", widths[3]),
        ("Avg hold", widths[4]),
        ("Best", widths[5]),
        ("Worst", widths[6]),
    ]);
    for row in rows {
        output::table_row(
            &[
                row.reason.clone(),
                row.count.to_string(),
                pct(row.win_rate),
                format!("{:+.2}%", row.avg_pnl),
                format!("{:.1}h", row.avg_hold_hours),
                format!("{:+.2}%", row.best),
                format!("{:+.2}%", row.worst),
            ],
            &widths,
        );
    }
}

pub fn print_holds(buckets: &[HoldDurationBucket]) {
    output::section("Hold durations");
    let widths = [8, 6, 6, 9];
    output::table_header(&[
        ("Held", widths[0]),
        ("Count", widths[1]),
        ("Wins", widths[2]),
        ("Avg PnL", widths[3]),
    ]);
    for bucket in buckets {
        output::table_row(
            &[
                bucket.label.to_string(),
                bucket.count.to_string(),
                bucket.wins.to_string(),
                format!("{:+.2}%", bucket.avg_pnl),
            ],
            &widths,
        );
    }
}

pub fn print_hours(horizon: Horizon, rows: &[HourOfDayStats]) {
    output::section(&format!("Outcomes by baseline hour (UTC, {horizon})"));
    let widths = [5, 7, 6, 8, 9];
    output::table_header(&[
        ("Hour", widths[0]),
        ("Sample", widths[1]),
        ("Wins", widths[2]),
        ("Win %", widths[3]),
        ("Score", widths[4]),
    ]);
    for row in rows {
        output::table_row(
            &[
                format!("{:02}", row.hour),
                row.sample_size.to_string(),
                row.wins.to_string(),
                pct(row.win_rate),
                format!("{:.4}", row.avg_score),
            ],
            &widths,
        );
    }
}

pub fn print_recent(rows: &[RecentOutcome]) {
    output::section("Recent events");
    let widths = [8, 12, 16, 9, 9, 9, 8];
    output::table_header(&[
        ("Ticker", widths[0]),
        ("Category", widths[1]),
        ("Recorded", widths[2]),
        ("30m", widths[3]),
        ("1h", widths[4]),
        ("1d", widths[5]),
        ("Final", widths[6]),
    ]);
    for row in rows {
        let change = |horizon: Horizon| {
            row.horizons
                .iter()
                .find(|snapshot| snapshot.horizon == horizon)
                .map_or_else(|| "-".to_string(), |s| format!("{:+.2}%", s.change_pct))
        };
        output::table_row(
            &[
                row.ticker.clone(),
                row.category.clone(),
                row.baseline_at.format("%m-%d %H:%M").to_string(),
                change(Horizon::M30),
                change(Horizon::H1),
                change(Horizon::D1),
                row.final_outcome
                    .map_or_else(|| "-".to_string(), |o| o.to_string()),
            ],
            &widths,
        );
    }
}
