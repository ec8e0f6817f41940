//! Handlers for `export` and `prune`.

use std::fs::OpenOptions;
use std::io::{self, Write};

use serde_json::json;

use super::command::{ExportArgs, PruneArgs};
use super::operator::operator;
use super::output;
use crate::error::Result;
use crate::port::inbound::operator::session::SessionRequest;

/// Execute `export`.
///
/// Without `--output` the JSON lines go to stdout and nothing else is printed.
pub fn execute_export(request: &SessionRequest, args: &ExportArgs) -> Result<()> {
    let jsonl = operator()?.export_recent_jsonl(request, args.limit, args.days)?;

    let Some(path) = &args.output else {
        let mut stdout = io::stdout().lock();
        stdout.write_all(jsonl.as_bytes())?;
        stdout.flush()?;
        return Ok(());
    };

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(jsonl.as_bytes())?;
    let written = jsonl.lines().count();

    if output::is_json() {
        output::json_output(json!({
            "command": "export",
            "path": path.display().to_string(),
            "lines": written,
        }));
        return Ok(());
    }

    output::success(&format!("Exported {written} events to {}", path.display()));
    Ok(())
}

/// Execute `prune`.
pub fn execute_prune(request: &SessionRequest, args: &PruneArgs) -> Result<()> {
    let deleted = operator()?.prune_older_than(request, args.days)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "prune",
            "days": args.days,
            "deleted": deleted,
        }));
        return Ok(());
    }

    output::success(&format!(
        "Deleted {deleted} events older than {} days",
        args.days
    ));
    Ok(())
}
