//! Database model types for Diesel ORM.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use diesel::prelude::*;

use super::schema::tracked_events;
use crate::domain::event::{HorizonObservation, TrackedEvent, TradeExit};
use crate::domain::horizon::Horizon;
use crate::domain::id::EventId;
use crate::domain::outcome::Outcome;
use crate::error::{Error, Result};

/// Full tracked-event row (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = tracked_events)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TrackedEventRow {
    pub id: String,
    pub ticker: String,
    pub category: String,
    pub source: String,
    pub label: Option<String>,
    pub baseline_value: f64,
    pub baseline_time: NaiveDateTime,
    pub m15_observed: Option<f64>,
    pub m15_change_pct: Option<f64>,
    pub m15_outcome: Option<String>,
    pub m15_score: Option<f64>,
    pub m30_observed: Option<f64>,
    pub m30_change_pct: Option<f64>,
    pub m30_outcome: Option<String>,
    pub m30_score: Option<f64>,
    pub h1_observed: Option<f64>,
    pub h1_change_pct: Option<f64>,
    pub h1_outcome: Option<String>,
    pub h1_score: Option<f64>,
    pub h4_observed: Option<f64>,
    pub h4_change_pct: Option<f64>,
    pub h4_outcome: Option<String>,
    pub h4_score: Option<f64>,
    pub d1_observed: Option<f64>,
    pub d1_change_pct: Option<f64>,
    pub d1_outcome: Option<String>,
    pub d1_score: Option<f64>,
    pub d7_observed: Option<f64>,
    pub d7_change_pct: Option<f64>,
    pub d7_outcome: Option<String>,
    pub d7_score: Option<f64>,
    pub momentum_score: Option<f64>,
    pub final_outcome: Option<String>,
    pub final_score: Option<f64>,
    pub confidence: Option<f64>,
    pub direction_correct: Option<bool>,
    pub exit_reason: Option<String>,
    pub pnl_pct: Option<f64>,
    pub hold_hours: Option<f64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Baseline-only row inserted when an event is first recorded.
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = tracked_events)]
pub struct NewTrackedEventRow<'a> {
    pub id: &'a str,
    pub ticker: &'a str,
    pub category: &'a str,
    pub source: &'a str,
    pub label: Option<&'a str>,
    pub baseline_value: f64,
    pub baseline_time: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Metadata refresh applied on upsert. `None` fields are left untouched.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = tracked_events)]
pub struct EventMetadataChangeset<'a> {
    pub ticker: &'a str,
    pub category: &'a str,
    pub source: &'a str,
    pub label: Option<&'a str>,
    pub baseline_value: f64,
    pub baseline_time: Option<NaiveDateTime>,
    pub updated_at: NaiveDateTime,
}

fn parse_outcome(raw: &str, id: &str, column: &str) -> Result<Outcome> {
    raw.parse::<Outcome>()
        .map_err(|e| Error::Storage(format!("event {id} column {column}: {e}")))
}

/// Rebuild one horizon from its four columns.
///
/// All four must be null together or set together.
fn horizon_from_columns(
    id: &str,
    horizon: Horizon,
    observed: Option<f64>,
    change_pct: Option<f64>,
    outcome: Option<&str>,
    score: Option<f64>,
) -> Result<Option<HorizonObservation>> {
    match (observed, change_pct, outcome, score) {
        (None, None, None, None) => Ok(None),
        (Some(observed_value), Some(change_pct), Some(outcome), Some(score)) => {
            Ok(Some(HorizonObservation {
                observed_value,
                change_pct,
                outcome: parse_outcome(outcome, id, horizon.key())?,
                score,
            }))
        }
        _ => Err(Error::Storage(format!(
            "event {id} has a partially populated {horizon} horizon"
        ))),
    }
}

impl TryFrom<TrackedEventRow> for TrackedEvent {
    type Error = Error;

    fn try_from(row: TrackedEventRow) -> Result<Self> {
        let id = row.id.as_str();
        let columns = [
            (
                Horizon::M15,
                row.m15_observed,
                row.m15_change_pct,
                row.m15_outcome.as_deref(),
                row.m15_score,
            ),
            (
                Horizon::M30,
                row.m30_observed,
                row.m30_change_pct,
                row.m30_outcome.as_deref(),
                row.m30_score,
            ),
            (
                Horizon::H1,
                row.h1_observed,
                row.h1_change_pct,
                row.h1_outcome.as_deref(),
                row.h1_score,
            ),
            (
                Horizon::H4,
                row.h4_observed,
                row.h4_change_pct,
                row.h4_outcome.as_deref(),
                row.h4_score,
            ),
            (
                Horizon::D1,
                row.d1_observed,
                row.d1_change_pct,
                row.d1_outcome.as_deref(),
                row.d1_score,
            ),
            (
                Horizon::D7,
                row.d7_observed,
                row.d7_change_pct,
                row.d7_outcome.as_deref(),
                row.d7_score,
            ),
        ];

        let mut observations = BTreeMap::new();
        for (horizon, observed, change, outcome, score) in columns {
            if let Some(obs) = horizon_from_columns(id, horizon, observed, change, outcome, score)?
            {
                observations.insert(horizon, obs);
            }
        }

        let final_outcome = row
            .final_outcome
            .as_deref()
            .map(|raw| parse_outcome(raw, id, "final_outcome"))
            .transpose()?;

        let exit = match (row.exit_reason.clone(), row.pnl_pct, row.hold_hours) {
            (Some(reason), Some(pnl_pct), Some(hold_duration_hours)) => Some(TradeExit {
                reason,
                pnl_pct,
                hold_duration_hours,
            }),
            _ => None,
        };

        Ok(TrackedEvent {
            id: EventId::new(row.id.clone()),
            ticker: row.ticker,
            category: row.category,
            source: row.source,
            label: row.label,
            baseline_value: row.baseline_value,
            baseline_at: row.baseline_time.and_utc(),
            observations,
            momentum_score: row.momentum_score,
            final_outcome,
            final_score: row.final_score,
            confidence: row.confidence,
            direction_correct: row.direction_correct,
            exit,
            created_at: row.created_at.and_utc(),
            updated_at: row.updated_at.and_utc(),
        })
    }
}
