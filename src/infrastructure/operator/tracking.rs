//! Tracking operator implementation.

use chrono::Duration;

use crate::domain::event::{DueItem, NewEvent, ObservationResult, TradeExit};
use crate::domain::horizon::Horizon;
use crate::domain::id::EventId;
use crate::error::Result;
use crate::port::inbound::operator::session::SessionRequest;
use crate::port::inbound::operator::tracking::TrackingOperator;

use super::{entry::Operator, shared};

impl TrackingOperator for Operator {
    fn record_event(&self, request: &SessionRequest, event: NewEvent) -> Result<EventId> {
        let (_, services) = shared::open(request)?;
        services.registry.record(event)
    }

    fn annotate_prediction(
        &self,
        request: &SessionRequest,
        id: &EventId,
        confidence: f64,
        correct: bool,
    ) -> Result<()> {
        let (_, services) = shared::open(request)?;
        services.registry.annotate_prediction(id, confidence, correct)
    }

    fn record_exit(&self, request: &SessionRequest, id: &EventId, exit: &TradeExit) -> Result<()> {
        let (_, services) = shared::open(request)?;
        services.registry.record_exit(id, exit)
    }

    fn record_observation(
        &self,
        request: &SessionRequest,
        id: &EventId,
        horizon: &str,
        value: f64,
    ) -> Result<ObservationResult> {
        let (_, services) = shared::open(request)?;
        services.updater.update_key(id, horizon, value)
    }

    fn due_events(
        &self,
        request: &SessionRequest,
        horizon: Horizon,
        max_age_days: Option<u32>,
    ) -> Result<Vec<DueItem>> {
        let (config, services) = shared::open(request)?;
        let days = max_age_days.unwrap_or(config.tracker.max_age_days);
        services
            .scheduler
            .get_due(horizon, Duration::days(i64::from(days)))
    }
}
