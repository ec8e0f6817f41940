//! Identifier newtypes.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique, immutable identifier of a tracked event.
///
/// Producers may supply their own ids (to make retries upserts); otherwise
/// one is generated from the ticker, the baseline time, and a random suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(String);

impl EventId {
    /// Wrap an existing identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate `{TICKER}-{yyyymmddHHMMSS}-{8 hex}`.
    #[must_use]
    pub fn generate(ticker: &str, at: DateTime<Utc>) -> Self {
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        Self(format!(
            "{}-{}-{}",
            ticker,
            at.format("%Y%m%d%H%M%S"),
            &suffix[..8]
        ))
    }

    /// Get the event ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EventId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EventId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn generated_ids_embed_ticker_and_time() {
        let at = Utc.with_ymd_and_hms(2026, 3, 4, 15, 30, 0).unwrap();
        let id = EventId::generate("NVDA", at);
        assert!(id.as_str().starts_with("NVDA-20260304153000-"));
        assert_eq!(id.as_str().len(), "NVDA-20260304153000-".len() + 8);
    }

    #[test]
    fn generated_ids_are_unique() {
        let at = Utc::now();
        assert_ne!(EventId::generate("SPY", at), EventId::generate("SPY", at));
    }
}
