//! Write-side use-cases: recording events, observations, and annotations.

use crate::domain::event::{DueItem, NewEvent, ObservationResult, TradeExit};
use crate::domain::horizon::Horizon;
use crate::domain::id::EventId;
use crate::error::Result;

use super::session::SessionRequest;

/// Event tracking use-cases for operator-facing adapters.
pub trait TrackingOperator: Send + Sync {
    /// Record a new event, or replace the one with the same id.
    fn record_event(&self, request: &SessionRequest, event: NewEvent) -> Result<EventId>;

    /// Attach stated confidence and direction correctness to an event.
    fn annotate_prediction(
        &self,
        request: &SessionRequest,
        id: &EventId,
        confidence: f64,
        correct: bool,
    ) -> Result<()>;

    /// Attach a trade exit to an event.
    fn record_exit(&self, request: &SessionRequest, id: &EventId, exit: &TradeExit) -> Result<()>;

    /// Record an observed value at the horizon named by `horizon`.
    fn record_observation(
        &self,
        request: &SessionRequest,
        id: &EventId,
        horizon: &str,
        value: f64,
    ) -> Result<ObservationResult>;

    /// Events awaiting an observation at `horizon`.
    ///
    /// `max_age_days` falls back to the configured tracker setting.
    fn due_events(
        &self,
        request: &SessionRequest,
        horizon: Horizon,
        max_age_days: Option<u32>,
    ) -> Result<Vec<DueItem>>;
}
