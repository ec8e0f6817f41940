//! Tracker service configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::application::updater::RetryPolicy;

/// Configuration for the periodic outcome tracker.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TrackerConfig {
    /// Seconds between ticks.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Events older than this are no longer observed.
    #[serde(default = "default_max_age_days")]
    pub max_age_days: u32,
    /// Per-fetch price timeout in milliseconds.
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,
    /// Maximum in-flight (fetch, update) pairs per horizon.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
    /// Maximum due items pulled per horizon per tick.
    #[serde(default = "default_batch_limit")]
    pub batch_limit: usize,
    /// Retries for transient storage failures.
    #[serde(default = "default_storage_retries")]
    pub storage_retries: u32,
    /// Initial retry delay in milliseconds; doubles per retry.
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

impl TrackerConfig {
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    #[must_use]
    pub fn max_age(&self) -> chrono::Duration {
        chrono::Duration::days(i64::from(self.max_age_days))
    }

    #[must_use]
    pub const fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.storage_retries,
            Duration::from_millis(self.retry_backoff_ms),
        )
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            max_age_days: default_max_age_days(),
            fetch_timeout_ms: default_fetch_timeout_ms(),
            max_concurrency: default_max_concurrency(),
            batch_limit: default_batch_limit(),
            storage_retries: default_storage_retries(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

const fn default_interval_secs() -> u64 {
    60
}

const fn default_max_age_days() -> u32 {
    7
}

const fn default_fetch_timeout_ms() -> u64 {
    5000
}

const fn default_max_concurrency() -> usize {
    8
}

const fn default_batch_limit() -> usize {
    500
}

const fn default_storage_retries() -> u32 {
    3
}

const fn default_retry_backoff_ms() -> u64 {
    200
}
