//! Unified operator capability surface for inbound adapters.

use super::runtime::RuntimeOperator;
use super::session::SessionOperator;
use super::statistics::StatisticsOperator;
use super::tracking::TrackingOperator;

/// Unified operator capability surface consumed by inbound adapters.
pub trait OperatorPort:
    RuntimeOperator + SessionOperator + StatisticsOperator + TrackingOperator
{
}

impl<T> OperatorPort for T where
    T: RuntimeOperator + SessionOperator + StatisticsOperator + TrackingOperator
{
}
