//! Runtime control of the periodic tracker.

use async_trait::async_trait;

use crate::domain::stats::TickSummary;
use crate::error::Result;

use super::session::SessionRequest;

/// Runtime control use-cases for operator-facing adapters.
#[async_trait]
pub trait RuntimeOperator: Send + Sync {
    /// Run a single tracker tick and report what it did.
    ///
    /// # Errors
    ///
    /// Returns an error if the store or price provider cannot be built.
    async fn run_once(&self, request: &SessionRequest) -> Result<TickSummary>;

    /// Run the tracker until Ctrl+C, then stop after the current tick.
    ///
    /// # Errors
    ///
    /// Returns an error if the store or price provider cannot be built, or
    /// the signal handler cannot be installed.
    async fn run_until_interrupted(&self, request: &SessionRequest) -> Result<()>;
}
