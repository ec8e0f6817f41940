//! Handlers for the write commands: `record`, `annotate`, and `exit`.

use serde_json::json;

use super::command::{AnnotateArgs, ExitArgs, RecordArgs};
use super::operator::operator;
use super::output;
use crate::domain::event::{NewEvent, TradeExit};
use crate::domain::id::EventId;
use crate::error::Result;
use crate::port::inbound::operator::session::SessionRequest;

/// Execute `record`.
pub fn execute_record(request: &SessionRequest, args: RecordArgs) -> Result<()> {
    let mut event = NewEvent::new(args.ticker, args.category, args.baseline).with_source(args.source);
    if let Some(id) = args.id {
        event = event.with_id(id);
    }
    if let Some(label) = args.label {
        event = event.with_label(label);
    }
    if let Some(at) = args.at {
        event = event.with_baseline_at(at);
    }

    let ticker = event.normalized_ticker();
    let id = operator()?.record_event(request, event)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "record",
            "id": id,
            "ticker": ticker,
        }));
        return Ok(());
    }

    output::success(&format!("Recorded {}", output::highlight(&id)));
    Ok(())
}

/// Execute `annotate`.
pub fn execute_annotate(request: &SessionRequest, args: &AnnotateArgs) -> Result<()> {
    let id = EventId::new(args.id.as_str());
    operator()?.annotate_prediction(request, &id, args.confidence, args.correct)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "annotate",
            "id": id,
            "confidence": args.confidence,
            "direction_correct": args.correct,
        }));
        return Ok(());
    }

    output::success(&format!("Annotated {id}"));
    Ok(())
}

/// Execute `exit`.
pub fn execute_exit(request: &SessionRequest, args: ExitArgs) -> Result<()> {
    let id = EventId::new(args.id);
    let exit = TradeExit {
        reason: args.reason,
        pnl_pct: args.pnl,
        hold_duration_hours: args.hold_hours,
    };
    operator()?.record_exit(request, &id, &exit)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "exit",
            "id": id,
            "reason": exit.reason,
            "pnl_pct": exit.pnl_pct,
            "hold_hours": exit.hold_duration_hours,
        }));
        return Ok(());
    }

    output::success(&format!(
        "Exit recorded for {id}: {} {}",
        exit.reason,
        output::signed(exit.pnl_pct, format!("{:+.2}%", exit.pnl_pct))
    ));
    Ok(())
}
