//! Handlers for `observe` and `due`.

use serde_json::json;

use super::command::{DueArgs, ObserveArgs};
use super::operator::operator;
use super::output;
use crate::domain::id::EventId;
use crate::error::Result;
use crate::port::inbound::operator::session::SessionRequest;

/// Execute `observe`.
pub fn execute_observe(request: &SessionRequest, args: &ObserveArgs) -> Result<()> {
    let id = EventId::new(args.id.as_str());
    let result = operator()?.record_observation(request, &id, &args.horizon, args.value)?;

    if output::is_json() {
        output::json_output(json!({ "command": "observe", "result": result }));
        return Ok(());
    }

    if result.already_recorded {
        output::warning(&format!(
            "{} already recorded for {id}; stored value kept",
            result.horizon
        ));
    } else {
        output::success(&format!("Recorded {} for {id}", result.horizon));
    }
    output::field(
        "Change",
        output::signed(result.change_pct, format!("{:+.2}%", result.change_pct)),
    );
    output::field("Outcome", result.outcome);
    output::field("Score", format!("{:.4}", result.score));
    Ok(())
}

/// Execute `due`.
pub fn execute_due(request: &SessionRequest, args: &DueArgs) -> Result<()> {
    let items = operator()?.due_events(request, args.horizon, args.max_age_days)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "due",
            "horizon": args.horizon,
            "items": items,
        }));
        return Ok(());
    }

    if items.is_empty() {
        output::note(&format!("Nothing due at {}", args.horizon));
        return Ok(());
    }

    output::section(&format!("Due at {} ({})", args.horizon, items.len()));
    let widths = [34, 8, 10, 20];
    output::table_header(&[
        ("Event", widths[0]),
        ("Ticker", widths[1]),
        ("Baseline", widths[2]),
        ("Recorded", widths[3]),
    ]);
    for item in &items {
        output::table_row(
            &[
                item.event_id.to_string(),
                item.ticker.clone(),
                format!("{:.2}", item.baseline_value),
                item.baseline_at.format("%Y-%m-%d %H:%M").to_string(),
            ],
            &widths,
        );
    }
    Ok(())
}
