//! Event registration service.
//!
//! Entry point for producers: validates new events, assigns ids, and
//! attaches the optional annotations that feed calibration and trade
//! analytics.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::domain::error::ValidationError;
use crate::domain::event::{NewEvent, TradeExit};
use crate::domain::id::EventId;
use crate::error::Result;
use crate::port::outbound::store::{EventStore, UpsertOutcome};

/// Creates and upserts tracked events.
pub struct EventRegistry {
    store: Arc<dyn EventStore>,
}

impl EventRegistry {
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self { store }
    }

    /// Record a new event with its baseline, or refresh an existing one.
    ///
    /// When `event.id` names an existing event only its metadata and
    /// baseline are refreshed; observed horizons and composites are kept.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a non-positive baseline or blank
    /// ticker/tags, or a storage error if the write fails.
    pub fn record(&self, event: NewEvent) -> Result<EventId> {
        self.record_at(event, Utc::now())
    }

    /// [`record`](Self::record) with an explicit clock.
    ///
    /// # Errors
    ///
    /// See [`record`](Self::record).
    pub fn record_at(&self, event: NewEvent, now: DateTime<Utc>) -> Result<EventId> {
        event.validate()?;

        let ticker = event.normalized_ticker();
        let id = match &event.id {
            Some(id) => id.clone(),
            None => EventId::generate(&ticker, event.baseline_at.unwrap_or(now)),
        };

        match self.store.upsert(&id, &event, now)? {
            UpsertOutcome::Created => info!(
                event_id = %id,
                ticker = %ticker,
                category = %event.category,
                baseline = event.baseline_value,
                "Tracking new event"
            ),
            UpsertOutcome::Updated => debug!(
                event_id = %id,
                ticker = %ticker,
                "Refreshed existing event"
            ),
        }

        Ok(id)
    }

    /// Attach the producer's stated confidence and whether the predicted
    /// direction turned out correct.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidConfidence`] outside `[0, 1]` and
    /// [`ValidationError::UnknownEvent`] for an unknown id.
    pub fn annotate_prediction(
        &self,
        id: &EventId,
        confidence: f64,
        direction_correct: bool,
    ) -> Result<()> {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(ValidationError::InvalidConfidence { value: confidence }.into());
        }
        if !self
            .store
            .annotate_prediction(id, confidence, direction_correct, Utc::now())?
        {
            return Err(ValidationError::UnknownEvent(id.to_string()).into());
        }
        debug!(event_id = %id, confidence, direction_correct, "Annotated prediction");
        Ok(())
    }

    /// Attach trade exit details reported by an external position tracker.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank reason, a negative hold
    /// duration, or an unknown id.
    pub fn record_exit(&self, id: &EventId, exit: &TradeExit) -> Result<()> {
        exit.validate()?;
        if !self.store.record_exit(id, exit, Utc::now())? {
            return Err(ValidationError::UnknownEvent(id.to_string()).into());
        }
        debug!(
            event_id = %id,
            reason = %exit.reason,
            pnl_pct = exit.pnl_pct,
            "Recorded trade exit"
        );
        Ok(())
    }
}
