//! JSON-lines export of recent outcomes.
//!
//! One self-contained JSON object per line, suitable for appending to a
//! shared log or piping into `jq`.

use std::io::Write;

use crate::domain::stats::RecentOutcome;
use crate::error::Result;
use crate::port::outbound::export::OutcomeSink;

/// [`OutcomeSink`] writing one JSON object per line to any writer.
pub struct JsonlSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonlSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutcomeSink for JsonlSink<W> {
    /// The writer is flushed on success.
    fn write_outcomes(&mut self, outcomes: &[RecentOutcome]) -> Result<usize> {
        for outcome in outcomes {
            serde_json::to_writer(&mut self.writer, outcome)?;
            self.writer.write_all(b"\n")?;
        }
        self.writer.flush()?;
        Ok(outcomes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::horizon::Horizon;
    use crate::domain::id::EventId;
    use crate::domain::outcome::Outcome;
    use crate::domain::stats::HorizonSnapshot;
    use chrono::{TimeZone, Utc};

    fn outcome(id: &str) -> RecentOutcome {
        RecentOutcome {
            id: EventId::new(id),
            ticker: "AAPL".into(),
            category: "breakout".into(),
            source: "scanner".into(),
            label: None,
            baseline_value: 100.0,
            baseline_at: Utc.with_ymd_and_hms(2026, 1, 5, 14, 30, 0).unwrap(),
            horizons: vec![HorizonSnapshot {
                horizon: Horizon::M30,
                change_pct: 3.5,
                outcome: Outcome::Win,
                score: 0.59375,
            }],
            momentum_score: Some(0.9),
            final_outcome: None,
            final_score: None,
        }
    }

    #[test]
    fn writes_one_object_per_line() {
        let mut sink = JsonlSink::new(Vec::new());
        let written = sink
            .write_outcomes(&[outcome("a"), outcome("b")])
            .unwrap();
        assert_eq!(written, 2);

        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["id"], "a");
        assert_eq!(first["horizons"][0]["horizon"], "30m");
        assert_eq!(first["horizons"][0]["outcome"], "win");
        assert_eq!(first["momentum_score"], 0.9);
        assert!(first["final_outcome"].is_null());
    }

    #[test]
    fn empty_export_writes_nothing() {
        let mut sink = JsonlSink::new(Vec::new());
        assert_eq!(sink.write_outcomes(&[]).unwrap(), 0);
        assert!(sink.into_inner().is_empty());
    }

    #[test]
    fn successive_batches_append() {
        let mut sink = JsonlSink::new(Vec::new());
        sink.write_outcomes(&[outcome("a")]).unwrap();
        sink.write_outcomes(&[outcome("b")]).unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(text.lines().count(), 2);
    }
}
