//! Validation errors for tracked events and observations.
//!
//! These signal a producer bug (malformed input) and are always surfaced
//! synchronously to the caller, never retried.
//!
//! # Examples
//!
//! ```
//! use hindsight::domain::error::ValidationError;
//! use hindsight::domain::event::NewEvent;
//!
//! let event = NewEvent::new("AAPL", "breakout", 0.0);
//! assert!(matches!(
//!     event.validate(),
//!     Err(ValidationError::NonPositiveBaseline { .. })
//! ));
//! ```

use thiserror::Error;

/// Errors raised when input violates a tracking invariant.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Baseline values must be strictly positive so change% is defined.
    #[error("baseline value must be positive, got {value}")]
    NonPositiveBaseline {
        /// The rejected baseline.
        value: f64,
    },

    /// Tickers identify the priced instrument and cannot be blank.
    #[error("ticker cannot be empty")]
    EmptyTicker,

    /// Category and source tags cannot be blank.
    #[error("{field} cannot be empty")]
    EmptyTag {
        /// Name of the blank tag.
        field: &'static str,
    },

    /// Horizon key outside the fixed set.
    #[error("unknown horizon '{0}' (expected one of 15m, 30m, 1h, 4h, 1d, 7d)")]
    UnknownHorizon(String),

    /// No tracked event exists under this id.
    #[error("unknown event id '{0}'")]
    UnknownEvent(String),

    /// Observed values must be finite and positive.
    #[error("observed value must be a positive finite number, got {value}")]
    InvalidObservation {
        /// The rejected observation.
        value: f64,
    },

    /// Confidence must lie in [0, 1].
    #[error("confidence must be between 0 and 1, got {value}")]
    InvalidConfidence {
        /// The rejected confidence.
        value: f64,
    },

    /// Hold durations are non-negative hours.
    #[error("hold duration must be a non-negative number of hours, got {value}")]
    InvalidHoldDuration {
        /// The rejected duration.
        value: f64,
    },

    /// Calibration bucket widths must split (0, 0.5].
    #[error("bucket width must be in (0, 0.5], got {value}")]
    InvalidBucketWidth {
        /// The rejected width.
        value: f64,
    },
}
