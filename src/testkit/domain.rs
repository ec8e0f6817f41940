//! Builders for domain values used across tests.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};

use crate::domain::event::DEFAULT_SOURCE;
use crate::domain::event::{NewEvent, TrackedEvent, TradeExit};
use crate::domain::id::EventId;

/// A `breakout` event with an explicit baseline time.
pub fn event_at(ticker: &str, baseline: f64, at: DateTime<Utc>) -> NewEvent {
    NewEvent::new(ticker, "breakout", baseline).with_baseline_at(at)
}

/// Trade exit details.
pub fn exit(reason: &str, pnl_pct: f64, hold_duration_hours: f64) -> TradeExit {
    TradeExit {
        reason: reason.to_string(),
        pnl_pct,
        hold_duration_hours,
    }
}

/// An unobserved in-memory tracked event with a baseline one hour ago.
///
/// For pure aggregation tests that do not need a store.
pub fn tracked(ticker: &str, baseline: f64) -> TrackedEvent {
    let now = Utc::now();
    TrackedEvent {
        id: EventId::generate(ticker, now),
        ticker: ticker.to_string(),
        category: "breakout".to_string(),
        source: DEFAULT_SOURCE.to_string(),
        label: None,
        baseline_value: baseline,
        baseline_at: now - Duration::hours(1),
        observations: BTreeMap::new(),
        momentum_score: None,
        final_outcome: None,
        final_score: None,
        confidence: None,
        direction_correct: None,
        exit: None,
        created_at: now,
        updated_at: now,
    }
}
