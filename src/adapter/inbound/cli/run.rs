//! Handler for the `run` command.

use serde_json::json;

use super::command::RunArgs;
use super::operator::operator;
use super::output;
use crate::domain::stats::TickSummary;
use crate::error::Result;
use crate::port::inbound::operator::session::{SessionRequest, SessionSnapshot};

/// Execute the run command.
pub async fn execute(
    request: &SessionRequest,
    snapshot: &SessionSnapshot,
    args: &RunArgs,
) -> Result<()> {
    let operator = operator()?;

    if args.once {
        let summary = operator.run_once(request).await?;
        print_summary(&summary);
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Database", &snapshot.database);
    output::field("Interval", format!("{}s", snapshot.interval_secs));
    output::field("Max age", format!("{}d", snapshot.max_age_days));
    output::note("Press Ctrl+C to stop");

    operator.run_until_interrupted(request).await?;

    output::success("Tracker stopped");
    Ok(())
}

fn print_summary(summary: &TickSummary) {
    if output::is_json() {
        output::json_output(json!({
            "command": "run.once",
            "due": summary.due,
            "recorded": summary.recorded,
            "already_recorded": summary.already_recorded,
            "unavailable": summary.unavailable,
            "failed": summary.failed,
        }));
        return;
    }

    output::section("Tick");
    output::field("Due", summary.due);
    output::field("Recorded", summary.recorded);
    output::field("Already recorded", summary.already_recorded);
    output::field("Unavailable", summary.unavailable);
    if summary.failed > 0 {
        output::warning(&format!("{} writes failed", summary.failed));
    }
}
