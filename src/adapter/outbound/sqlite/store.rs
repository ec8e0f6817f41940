//! SQLite event store implementation.
//!
//! One wide row per tracked event. Horizon writes run inside an IMMEDIATE
//! transaction scoped to a single row and are guarded by
//! `<horizon>_observed IS NULL`, so a retried or racing write can never
//! overwrite a committed horizon.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::OptionalExtension;
use diesel::SqliteConnection;
use tracing::{debug, warn};

use crate::adapter::outbound::sqlite::database::connection::{configure_sqlite_connection, DbPool};
use crate::adapter::outbound::sqlite::database::model::{
    EventMetadataChangeset, NewTrackedEventRow, TrackedEventRow,
};
use crate::adapter::outbound::sqlite::database::schema::tracked_events;
use crate::domain::error::ValidationError;
use crate::domain::event::{DueItem, HorizonObservation, NewEvent, TrackedEvent, TradeExit};
use crate::domain::horizon::Horizon;
use crate::domain::id::EventId;
use crate::domain::window::saturating_sub;
use crate::error::{Error, Result};
use crate::port::outbound::store::{CommitOutcome, EventFilter, EventStore, UpsertOutcome};

/// Bind the four column types of `$horizon` to local names and evaluate
/// `$body` with them in scope.
macro_rules! with_horizon_columns {
    ($horizon:expr, |$observed:ident, $change:ident, $outcome:ident, $score:ident| $body:expr) => {
        match $horizon {
            Horizon::M15 => {
                #[allow(unused_imports)]
                use tracked_events::{
                    m15_change_pct as $change, m15_observed as $observed,
                    m15_outcome as $outcome, m15_score as $score,
                };
                $body
            }
            Horizon::M30 => {
                #[allow(unused_imports)]
                use tracked_events::{
                    m30_change_pct as $change, m30_observed as $observed,
                    m30_outcome as $outcome, m30_score as $score,
                };
                $body
            }
            Horizon::H1 => {
                #[allow(unused_imports)]
                use tracked_events::{
                    h1_change_pct as $change, h1_observed as $observed,
                    h1_outcome as $outcome, h1_score as $score,
                };
                $body
            }
            Horizon::H4 => {
                #[allow(unused_imports)]
                use tracked_events::{
                    h4_change_pct as $change, h4_observed as $observed,
                    h4_outcome as $outcome, h4_score as $score,
                };
                $body
            }
            Horizon::D1 => {
                #[allow(unused_imports)]
                use tracked_events::{
                    d1_change_pct as $change, d1_observed as $observed,
                    d1_outcome as $outcome, d1_score as $score,
                };
                $body
            }
            Horizon::D7 => {
                #[allow(unused_imports)]
                use tracked_events::{
                    d7_change_pct as $change, d7_observed as $observed,
                    d7_outcome as $outcome, d7_score as $score,
                };
                $body
            }
        }
    };
}

/// SQLite-backed event store.
///
/// Implements the [`EventStore`] trait. Cheap to clone; clones share the pool.
#[derive(Clone)]
pub struct SqliteEventStore {
    /// Database connection pool.
    pool: DbPool,
}

impl SqliteEventStore {
    /// Create a new event store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Access the underlying pool (for migrations and diagnostics).
    #[must_use]
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    fn conn(&self) -> Result<PooledConnection<ConnectionManager<SqliteConnection>>> {
        let mut conn = self.pool.get()?;
        if let Err(e) = configure_sqlite_connection(&mut conn) {
            warn!(error = %e, "Failed to configure SQLite connection");
        }
        Ok(conn)
    }

    fn load_row(conn: &mut SqliteConnection, id: &EventId) -> Result<Option<TrackedEvent>> {
        let row: Option<TrackedEventRow> = tracked_events::table
            .find(id.as_str())
            .select(TrackedEventRow::as_select())
            .first(conn)
            .optional()?;
        row.map(TrackedEvent::try_from).transpose()
    }

    fn write_horizon(
        conn: &mut SqliteConnection,
        event: &TrackedEvent,
        horizon: Horizon,
        obs: &HorizonObservation,
        now: NaiveDateTime,
    ) -> Result<usize> {
        let id = event.id.as_str();
        let final_outcome = event.final_outcome.map(|o| o.as_str());

        let updated = with_horizon_columns!(horizon, |observed, change, outcome, score| {
            diesel::update(
                tracked_events::table
                    .filter(tracked_events::id.eq(id))
                    .filter(observed.is_null()),
            )
            .set((
                observed.eq(Some(obs.observed_value)),
                change.eq(Some(obs.change_pct)),
                outcome.eq(Some(obs.outcome.as_str())),
                score.eq(Some(obs.score)),
                tracked_events::momentum_score.eq(event.momentum_score),
                tracked_events::final_outcome.eq(final_outcome),
                tracked_events::final_score.eq(event.final_score),
                tracked_events::updated_at.eq(now),
            ))
            .execute(conn)
        })?;

        Ok(updated)
    }
}

impl EventStore for SqliteEventStore {
    fn upsert(&self, id: &EventId, event: &NewEvent, now: DateTime<Utc>) -> Result<UpsertOutcome> {
        let ticker = event.normalized_ticker();
        let category = event.category.trim();
        let source = event.source.trim();
        let label = event.label.as_deref();
        let now_naive = now.naive_utc();

        let mut conn = self.conn()?;
        let outcome = conn.immediate_transaction::<_, Error, _>(|conn| {
            let exists: Option<String> = tracked_events::table
                .find(id.as_str())
                .select(tracked_events::id)
                .first(conn)
                .optional()?;

            if exists.is_some() {
                let changes = EventMetadataChangeset {
                    ticker: &ticker,
                    category,
                    source,
                    label,
                    baseline_value: event.baseline_value,
                    baseline_time: event.baseline_at.map(|at| at.naive_utc()),
                    updated_at: now_naive,
                };
                diesel::update(tracked_events::table.find(id.as_str()))
                    .set(&changes)
                    .execute(conn)?;
                Ok(UpsertOutcome::Updated)
            } else {
                let row = NewTrackedEventRow {
                    id: id.as_str(),
                    ticker: &ticker,
                    category,
                    source,
                    label,
                    baseline_value: event.baseline_value,
                    baseline_time: event.baseline_at.unwrap_or(now).naive_utc(),
                    created_at: now_naive,
                    updated_at: now_naive,
                };
                diesel::insert_into(tracked_events::table)
                    .values(&row)
                    .execute(conn)?;
                Ok(UpsertOutcome::Created)
            }
        })?;

        debug!(event_id = %id, ticker = %ticker, ?outcome, "Upserted tracked event");
        Ok(outcome)
    }

    fn get(&self, id: &EventId) -> Result<Option<TrackedEvent>> {
        let mut conn = self.conn()?;
        Self::load_row(&mut conn, id)
    }

    fn commit_observation(
        &self,
        id: &EventId,
        horizon: Horizon,
        observed_value: f64,
        now: DateTime<Utc>,
    ) -> Result<CommitOutcome> {
        let mut conn = self.conn()?;
        conn.immediate_transaction::<_, Error, _>(|conn| {
            let mut event = Self::load_row(conn, id)?
                .ok_or_else(|| ValidationError::UnknownEvent(id.to_string()))?;

            if let Some(existing) = event.observation(horizon) {
                return Ok(CommitOutcome::AlreadyObserved(*existing));
            }

            let obs = HorizonObservation::measure(event.baseline_value, observed_value);
            event.apply(horizon, obs);

            let written = Self::write_horizon(conn, &event, horizon, &obs, now.naive_utc())?;
            if written == 0 {
                // Lost the compare-and-swap; report what the winner stored.
                let stored = Self::load_row(conn, id)?
                    .and_then(|e| e.observation(horizon).copied())
                    .ok_or_else(|| {
                        Error::Storage(format!("event {id} {horizon} vanished during write"))
                    })?;
                return Ok(CommitOutcome::AlreadyObserved(stored));
            }

            Ok(CommitOutcome::Committed(obs))
        })
    }

    fn annotate_prediction(
        &self,
        id: &EventId,
        confidence: f64,
        direction_correct: bool,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        let mut conn = self.conn()?;
        let updated = diesel::update(tracked_events::table.find(id.as_str()))
            .set((
                tracked_events::confidence.eq(Some(confidence)),
                tracked_events::direction_correct.eq(Some(direction_correct)),
                tracked_events::updated_at.eq(now.naive_utc()),
            ))
            .execute(&mut conn)?;
        Ok(updated > 0)
    }

    fn record_exit(&self, id: &EventId, exit: &TradeExit, now: DateTime<Utc>) -> Result<bool> {
        let mut conn = self.conn()?;
        let updated = diesel::update(tracked_events::table.find(id.as_str()))
            .set((
                tracked_events::exit_reason.eq(Some(exit.reason.trim())),
                tracked_events::pnl_pct.eq(Some(exit.pnl_pct)),
                tracked_events::hold_hours.eq(Some(exit.hold_duration_hours)),
                tracked_events::updated_at.eq(now.naive_utc()),
            ))
            .execute(&mut conn)?;
        Ok(updated > 0)
    }

    fn due(
        &self,
        horizon: Horizon,
        now: DateTime<Utc>,
        max_age: Duration,
        limit: Option<usize>,
    ) -> Result<Vec<DueItem>> {
        let newest_baseline = (now - horizon.duration()).naive_utc();
        let oldest_baseline = saturating_sub(now, max_age).naive_utc();
        let mut conn = self.conn()?;

        let rows: Vec<(String, String, f64, NaiveDateTime)> =
            with_horizon_columns!(horizon, |observed, change, outcome, score| {
                let mut query = tracked_events::table
                    .filter(observed.is_null())
                    .filter(tracked_events::baseline_time.le(newest_baseline))
                    .filter(tracked_events::baseline_time.ge(oldest_baseline))
                    .order((tracked_events::baseline_time.asc(), tracked_events::id.asc()))
                    .select((
                        tracked_events::id,
                        tracked_events::ticker,
                        tracked_events::baseline_value,
                        tracked_events::baseline_time,
                    ))
                    .into_boxed();
                if let Some(limit) = limit {
                    query = query.limit(i64::try_from(limit).unwrap_or(i64::MAX));
                }
                query.load(&mut conn)
            })?;

        Ok(rows
            .into_iter()
            .map(|(id, ticker, baseline_value, baseline_time)| DueItem {
                event_id: EventId::new(id),
                ticker,
                baseline_value,
                baseline_at: baseline_time.and_utc(),
                horizon,
            })
            .collect())
    }

    fn load_window(&self, since: DateTime<Utc>, filter: &EventFilter) -> Result<Vec<TrackedEvent>> {
        let mut conn = self.conn()?;
        let mut query = tracked_events::table
            .filter(tracked_events::baseline_time.ge(since.naive_utc()))
            .select(TrackedEventRow::as_select())
            .order(tracked_events::baseline_time.asc())
            .into_boxed();

        if let Some(category) = &filter.category {
            query = query.filter(tracked_events::category.eq(category.clone()));
        }
        if let Some(ticker) = &filter.ticker {
            query = query.filter(tracked_events::ticker.eq(ticker.clone()));
        }
        if let Some(source) = &filter.source {
            query = query.filter(tracked_events::source.eq(source.clone()));
        }

        let rows: Vec<TrackedEventRow> = query.load(&mut conn)?;
        rows.into_iter().map(TrackedEvent::try_from).collect()
    }

    fn recent(&self, since: DateTime<Utc>, limit: usize) -> Result<Vec<TrackedEvent>> {
        let mut conn = self.conn()?;
        let rows: Vec<TrackedEventRow> = tracked_events::table
            .filter(tracked_events::baseline_time.ge(since.naive_utc()))
            .select(TrackedEventRow::as_select())
            .order(tracked_events::baseline_time.desc())
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .load(&mut conn)?;
        rows.into_iter().map(TrackedEvent::try_from).collect()
    }

    fn prune_before(&self, cutoff: DateTime<Utc>) -> Result<usize> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(
            tracked_events::table.filter(tracked_events::baseline_time.lt(cutoff.naive_utc())),
        )
        .execute(&mut conn)?;

        if deleted > 0 {
            debug!(events = deleted, cutoff = %cutoff, "Pruned old tracked events");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::sqlite::database::connection::{
        create_pool_with_size, run_migrations,
    };
    use crate::domain::outcome::Outcome;
    use approx::assert_relative_eq;
    use std::sync::atomic::{AtomicU64, Ordering};

    fn setup_store() -> SqliteEventStore {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_url = format!("file:store_test_db_{id}?mode=memory&cache=shared");
        let pool = create_pool_with_size(&db_url, 1).unwrap();
        run_migrations(&pool).unwrap();
        SqliteEventStore::new(pool)
    }

    fn record(store: &SqliteEventStore, id: &str, baseline: f64, at: DateTime<Utc>) -> EventId {
        let event_id = EventId::new(id);
        let event = NewEvent::new("aapl", "breakout", baseline).with_baseline_at(at);
        store.upsert(&event_id, &event, at).unwrap();
        event_id
    }

    #[test]
    fn upsert_creates_then_updates() {
        let store = setup_store();
        let now = Utc::now();
        let id = EventId::new("e1");

        let first = store
            .upsert(&id, &NewEvent::new("aapl", "breakout", 100.0), now)
            .unwrap();
        assert_eq!(first, UpsertOutcome::Created);

        let second = store
            .upsert(
                &id,
                &NewEvent::new("aapl", "momentum", 101.0).with_label("retry"),
                now,
            )
            .unwrap();
        assert_eq!(second, UpsertOutcome::Updated);

        let event = store.get(&id).unwrap().unwrap();
        assert_eq!(event.ticker, "AAPL");
        assert_eq!(event.category, "momentum");
        assert_eq!(event.baseline_value, 101.0);
        assert_eq!(event.label.as_deref(), Some("retry"));
    }

    #[test]
    fn upsert_without_label_keeps_existing_label() {
        let store = setup_store();
        let now = Utc::now();
        let id = EventId::new("e1");
        store
            .upsert(&id, &NewEvent::new("AAPL", "x", 10.0).with_label("first"), now)
            .unwrap();
        store
            .upsert(&id, &NewEvent::new("AAPL", "x", 10.0), now)
            .unwrap();
        assert_eq!(
            store.get(&id).unwrap().unwrap().label.as_deref(),
            Some("first")
        );
    }

    #[test]
    fn upsert_preserves_populated_horizons() {
        let store = setup_store();
        let baseline_at = Utc::now() - Duration::hours(1);
        let id = record(&store, "e1", 100.0, baseline_at);
        store
            .commit_observation(&id, Horizon::M30, 103.5, Utc::now())
            .unwrap();

        store
            .upsert(&id, &NewEvent::new("AAPL", "breakout", 100.0), Utc::now())
            .unwrap();

        let event = store.get(&id).unwrap().unwrap();
        assert!(event.is_observed(Horizon::M30));
        assert!(event.momentum_score.is_some());
        assert_eq!(
            event.baseline_at.timestamp_micros(),
            baseline_at.timestamp_micros()
        );
    }

    #[test]
    fn commit_observation_writes_horizon_and_momentum() {
        let store = setup_store();
        let id = record(&store, "e1", 100.0, Utc::now() - Duration::minutes(31));

        let outcome = store
            .commit_observation(&id, Horizon::M30, 103.5, Utc::now())
            .unwrap();
        assert!(matches!(outcome, CommitOutcome::Committed(_)));
        assert_eq!(outcome.observation().outcome, Outcome::Win);

        let event = store.get(&id).unwrap().unwrap();
        assert_relative_eq!(event.momentum_score.unwrap(), 0.9, epsilon = 1e-9);
        assert!(event.final_outcome.is_none());
    }

    #[test]
    fn commit_observation_is_write_once() {
        let store = setup_store();
        let id = record(&store, "e1", 50.0, Utc::now() - Duration::days(1));

        let first = store
            .commit_observation(&id, Horizon::D1, 47.0, Utc::now())
            .unwrap();
        let second = store
            .commit_observation(&id, Horizon::D1, 60.0, Utc::now())
            .unwrap();

        assert!(matches!(second, CommitOutcome::AlreadyObserved(_)));
        assert_eq!(first.observation(), second.observation());

        let event = store.get(&id).unwrap().unwrap();
        assert_eq!(event.observation(Horizon::D1).unwrap().observed_value, 47.0);
        assert_eq!(event.final_outcome, Some(Outcome::Loss));
        assert_relative_eq!(event.final_score.unwrap(), -0.75, epsilon = 1e-9);
    }

    #[test]
    fn commit_observation_unknown_event_is_validation_error() {
        let store = setup_store();
        let err = store
            .commit_observation(&EventId::new("missing"), Horizon::H1, 10.0, Utc::now())
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::UnknownEvent(_))
        ));
    }

    #[test]
    fn due_filters_by_age_and_population() {
        let store = setup_store();
        let now = Utc::now();
        let fresh = record(&store, "fresh", 10.0, now - Duration::minutes(5));
        let ready = record(&store, "ready", 10.0, now - Duration::minutes(20));
        let older = record(&store, "older", 10.0, now - Duration::minutes(40));
        let stale = record(&store, "stale", 10.0, now - Duration::days(8));
        let done = record(&store, "done", 10.0, now - Duration::minutes(50));
        store
            .commit_observation(&done, Horizon::M15, 10.1, now)
            .unwrap();

        let due = store
            .due(Horizon::M15, now, Duration::days(7), None)
            .unwrap();
        let ids: Vec<&EventId> = due.iter().map(|d| &d.event_id).collect();

        assert_eq!(ids, vec![&older, &ready]);
        assert!(!ids.contains(&&fresh));
        assert!(!ids.contains(&&stale));
        assert!(due.iter().all(|d| d.horizon == Horizon::M15));
    }

    #[test]
    fn due_with_unbounded_max_age_includes_old_events() {
        let store = setup_store();
        let now = Utc::now();
        let ancient = record(&store, "ancient", 10.0, now - Duration::days(3650));

        let due = store
            .due(Horizon::H1, now, Duration::days(i64::from(u32::MAX)), None)
            .unwrap();
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].event_id, ancient);

        let due = store.due(Horizon::H1, now, Duration::MAX, None).unwrap();
        assert_eq!(due.len(), 1);
    }

    #[test]
    fn due_respects_limit() {
        let store = setup_store();
        let now = Utc::now();
        for i in 0..5 {
            record(&store, &format!("e{i}"), 10.0, now - Duration::hours(2 + i));
        }
        let due = store
            .due(Horizon::H1, now, Duration::days(7), Some(2))
            .unwrap();
        assert_eq!(due.len(), 2);
        assert_eq!(due[0].event_id.as_str(), "e4");
    }

    #[test]
    fn annotations_attach_to_known_events_only() {
        let store = setup_store();
        let id = record(&store, "e1", 10.0, Utc::now());

        assert!(store.annotate_prediction(&id, 0.85, true, Utc::now()).unwrap());
        assert!(!store
            .annotate_prediction(&EventId::new("nope"), 0.85, true, Utc::now())
            .unwrap());

        let exit = TradeExit {
            reason: "take_profit".into(),
            pnl_pct: 3.2,
            hold_duration_hours: 2.5,
        };
        assert!(store.record_exit(&id, &exit, Utc::now()).unwrap());

        let event = store.get(&id).unwrap().unwrap();
        assert_eq!(event.confidence, Some(0.85));
        assert_eq!(event.direction_correct, Some(true));
        assert_eq!(event.exit, Some(exit));
    }

    #[test]
    fn load_window_filters_and_recent_orders() {
        let store = setup_store();
        let now = Utc::now();
        record(&store, "old", 10.0, now - Duration::days(10));
        record(&store, "a", 10.0, now - Duration::hours(3));
        record(&store, "b", 10.0, now - Duration::hours(1));
        let other = EventId::new("c");
        store
            .upsert(
                &other,
                &NewEvent::new("MSFT", "reversal", 5.0).with_baseline_at(now),
                now,
            )
            .unwrap();

        let window = store
            .load_window(now - Duration::days(1), &EventFilter::category("breakout"))
            .unwrap();
        let ids: Vec<&str> = window.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);

        let recent = store.recent(now - Duration::days(1), 2).unwrap();
        let ids: Vec<&str> = recent.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b"]);
    }

    #[test]
    fn prune_before_deletes_only_old_rows() {
        let store = setup_store();
        let now = Utc::now();
        record(&store, "old", 10.0, now - Duration::days(40));
        let keep = record(&store, "new", 10.0, now - Duration::days(1));

        assert_eq!(store.prune_before(now - Duration::days(30)).unwrap(), 1);
        assert!(store.get(&keep).unwrap().is_some());
    }
}
