//! Canonical test configurations.
//!
//! Single source of truth for config structs used across tests.

use crate::application::tracker::config::TrackerConfig;

/// Tracker config with a short interval, short timeouts, and no retry delay.
pub fn fast_tracker() -> TrackerConfig {
    TrackerConfig {
        interval_secs: 1,
        max_age_days: 7,
        fetch_timeout_ms: 500,
        max_concurrency: 4,
        batch_limit: 100,
        storage_retries: 2,
        retry_backoff_ms: 1,
    }
}
