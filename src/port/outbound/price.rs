//! Price port for fetching the current value of a ticker.

use async_trait::async_trait;

use crate::error::Result;

/// Supplies the latest observable value for a ticker.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - `Ok(None)` means the provider answered but has no value; transport
///   failures are `Err`. Both leave the horizon pending.
/// - Callers wrap each call in their own timeout.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &'static str;

    /// Fetch the current value for `ticker`.
    async fn current_value(&self, ticker: &str) -> Result<Option<f64>>;
}
