//! JSON serialization for analytics output.

use serde::Serialize;
use serde_json::{json, Value};

use crate::domain::stats::{OutcomeStats, Report};

/// Wrap a report in the `{command, has_data, data}` envelope.
///
/// `NoData` serializes with `"data": null`.
pub fn report_to_json<T: Serialize>(command: &str, report: &Report<T>) -> Value {
    json!({
        "command": command,
        "has_data": report.has_data(),
        "data": report.data(),
    })
}

/// Like [`report_to_json`], but an empty window still reports
/// `"sample_size": 0` so consumers can read the count unconditionally.
pub fn outcome_stats_to_json(command: &str, report: &Report<OutcomeStats>) -> Value {
    let mut value = report_to_json(command, report);
    if !report.has_data() {
        value["data"] = json!({ "sample_size": 0 });
    }
    value
}
