//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings.
//! Configuration is loaded from a TOML file; every section is optional and
//! falls back to defaults.
//!
//! # Example
//!
//! ```no_run
//! use hindsight::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use super::logging::LoggingConfig;
use super::price::{PriceConfig, PriceSource};
use crate::application::tracker::config::TrackerConfig;
use crate::domain::horizon::Horizon;
use crate::error::{ConfigError, Result};

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`].
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Path to SQLite database file.
    ///
    /// Defaults to "hindsight.db" in the current directory.
    #[serde(default = "default_database_path")]
    pub database: String,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Tracker cadence, timeouts, and retry settings.
    #[serde(default)]
    pub tracker: TrackerConfig,

    /// Price provider selection.
    #[serde(default)]
    pub price: PriceConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database_path(),
            logging: LoggingConfig::default(),
            tracker: TrackerConfig::default(),
            price: PriceConfig::default(),
        }
    }
}

fn default_database_path() -> String {
    "hindsight.db".to_string()
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is
    /// malformed, or validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Initialize logging from the `[logging]` section.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Database URL for the connection pool.
    #[must_use]
    pub fn database_url(&self) -> String {
        format!("sqlite://{}", self.database)
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        if self.database.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "database" }.into());
        }

        let tracker = &self.tracker;
        if tracker.interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "interval_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if tracker.max_concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_concurrency",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if tracker.fetch_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "fetch_timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if tracker.batch_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "batch_limit",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if tracker.max_age_days == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_age_days",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        let longest = Horizon::ALL
            .iter()
            .map(|h| h.duration())
            .max()
            .unwrap_or_else(chrono::Duration::zero);
        if tracker.max_age() < longest {
            warn!(
                max_age_days = tracker.max_age_days,
                "max_age_days is shorter than the longest horizon; it will never be observed"
            );
        }

        if self.price.provider == PriceSource::Yahoo && self.price.base_url.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "base_url" }.into());
        }
        if let Some((ticker, value)) = self
            .price
            .static_prices
            .iter()
            .find(|(_, v)| !v.is_finite() || **v <= 0.0)
        {
            return Err(ConfigError::InvalidValue {
                field: "static_prices",
                reason: format!("{ticker} has non-positive price {value}"),
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::infrastructure::config::logging::LogFormat;

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::parse_toml("").unwrap();
        assert_eq!(config.database, "hindsight.db");
        assert_eq!(config.tracker, TrackerConfig::default());
        assert_eq!(config.tracker.interval_secs, 60);
        assert_eq!(config.tracker.max_age_days, 7);
        assert_eq!(config.price.provider, PriceSource::Yahoo);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.database_url(), "sqlite://hindsight.db");
    }

    #[test]
    fn full_config_parses() {
        let toml = r#"
            database = "/var/lib/hindsight/events.db"

            [logging]
            level = "debug"
            format = "json"

            [tracker]
            interval_secs = 30
            max_age_days = 10
            fetch_timeout_ms = 2500
            max_concurrency = 16
            batch_limit = 200
            storage_retries = 5
            retry_backoff_ms = 50

            [price]
            provider = "static"

            [price.static_prices]
            AAPL = 190.5
        "#;
        let config = Config::parse_toml(toml).unwrap();
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.tracker.max_concurrency, 16);
        assert_eq!(config.tracker.retry_policy().retries, 5);
        assert_eq!(config.price.provider, PriceSource::Static);
        assert_eq!(config.price.static_prices.get("AAPL"), Some(&190.5));
    }

    #[test]
    fn zero_values_are_rejected() {
        for (section, field) in [
            ("interval_secs = 0", "interval_secs"),
            ("max_concurrency = 0", "max_concurrency"),
            ("fetch_timeout_ms = 0", "fetch_timeout_ms"),
        ] {
            let err = Config::parse_toml(&format!("[tracker]\n{section}")).unwrap_err();
            match err {
                Error::Config(ConfigError::InvalidValue { field: f, .. }) => assert_eq!(f, field),
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn short_max_age_is_allowed() {
        let config = Config::parse_toml("[tracker]\nmax_age_days = 2").unwrap();
        assert_eq!(config.tracker.max_age_days, 2);
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        assert!(matches!(
            Config::parse_toml("database = ["),
            Err(Error::Config(ConfigError::Parse(_)))
        ));
    }

    #[test]
    fn unknown_provider_is_parse_error() {
        assert!(Config::parse_toml("[price]\nprovider = \"bloomberg\"").is_err());
    }

    #[test]
    fn non_positive_static_price_is_rejected() {
        let toml = "[price]\nprovider = \"static\"\n[price.static_prices]\nAAPL = 0.0";
        assert!(matches!(
            Config::parse_toml(toml),
            Err(Error::Config(ConfigError::InvalidValue {
                field: "static_prices",
                ..
            }))
        ));
    }
}
