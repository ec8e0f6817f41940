//! Export port for handing recent outcomes to downstream consumers.

use crate::domain::stats::RecentOutcome;
use crate::error::Result;

/// Destination for exported outcomes.
pub trait OutcomeSink {
    /// Write `outcomes` in order and return how many were written.
    fn write_outcomes(&mut self, outcomes: &[RecentOutcome]) -> Result<usize>;
}
