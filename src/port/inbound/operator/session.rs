//! Per-invocation session settings shared by every operator use-case.

use crate::error::Result;

/// Settings an inbound adapter resolves before calling the operator.
///
/// Every operator method takes the same request, so an adapter builds it
/// once per invocation.
#[derive(Debug, Clone, Default)]
pub struct SessionRequest {
    /// Raw TOML configuration content. Built-in defaults apply when absent.
    pub config_toml: Option<String>,

    /// Database path overriding whatever the configuration names.
    pub database: Option<String>,

    /// Database path used when no configuration content is given.
    pub default_database: Option<String>,

    /// Number of `-v` flags given.
    pub verbosity: u8,

    /// Keep the configured log level instead of quieting to warnings.
    pub long_running: bool,
}

/// Resolved settings for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Database path in use.
    pub database: String,

    /// Seconds between tracker ticks.
    pub interval_secs: u64,

    /// Events older than this many days are no longer tracked.
    pub max_age_days: u32,

    /// Log level in effect.
    pub log_level: String,
}

/// Session setup use-cases.
pub trait SessionOperator: Send + Sync {
    /// Resolve configuration and initialize logging for this invocation.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration content is malformed or
    /// invalid.
    fn prepare_session(&self, request: &SessionRequest) -> Result<SessionSnapshot>;
}
