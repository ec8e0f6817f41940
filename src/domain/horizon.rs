//! Fixed observation horizons.
//!
//! Every tracked event is re-priced at each of six horizons after its
//! baseline. The set is closed: storage columns, scheduling, and the
//! final-score weight table are all keyed on [`Horizon`].

use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::error::ValidationError;

/// A follow-up observation point measured from the baseline timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Horizon {
    #[serde(rename = "15m")]
    M15,
    #[serde(rename = "30m")]
    M30,
    #[serde(rename = "1h")]
    H1,
    #[serde(rename = "4h")]
    H4,
    #[serde(rename = "1d")]
    D1,
    #[serde(rename = "7d")]
    D7,
}

impl Horizon {
    /// All horizons in ascending duration order.
    pub const ALL: [Horizon; 6] = [
        Horizon::M15,
        Horizon::M30,
        Horizon::H1,
        Horizon::H4,
        Horizon::D1,
        Horizon::D7,
    ];

    /// Horizon whose observation triggers the momentum estimate.
    pub const MOMENTUM: Horizon = Horizon::M30;

    /// Horizon whose observation triggers the final outcome blend.
    pub const FINAL: Horizon = Horizon::D1;

    /// Short key used in config, CLI arguments, and exports.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::M15 => "15m",
            Self::M30 => "30m",
            Self::H1 => "1h",
            Self::H4 => "4h",
            Self::D1 => "1d",
            Self::D7 => "7d",
        }
    }

    /// Time after baseline at which the horizon becomes due.
    #[must_use]
    pub fn duration(self) -> Duration {
        match self {
            Self::M15 => Duration::minutes(15),
            Self::M30 => Duration::minutes(30),
            Self::H1 => Duration::hours(1),
            Self::H4 => Duration::hours(4),
            Self::D1 => Duration::days(1),
            Self::D7 => Duration::days(7),
        }
    }

    /// Weight in the final-score blend. 7d is tracked but not blended.
    #[must_use]
    pub const fn weight(self) -> Option<f64> {
        match self {
            Self::M15 => Some(0.10),
            Self::M30 => Some(0.15),
            Self::H1 => Some(0.20),
            Self::H4 => Some(0.25),
            Self::D1 => Some(0.30),
            Self::D7 => None,
        }
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Horizon {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|h| h.key() == key)
            .ok_or_else(|| ValidationError::UnknownHorizon(s.to_string()))
    }
}
