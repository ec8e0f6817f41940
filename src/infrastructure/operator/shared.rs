//! Shared helper routines for operator implementations.

use tracing::debug;

use crate::error::Result;
use crate::infrastructure::bootstrap::Services;
use crate::infrastructure::config::settings::Config;
use crate::port::inbound::operator::session::SessionRequest;

/// Resolve the configuration a request describes.
///
/// Configuration content wins over built-in defaults, and the database
/// override wins over both.
pub(super) fn resolve_config(request: &SessionRequest) -> Result<Config> {
    let mut config = match &request.config_toml {
        Some(content) => Config::parse_toml(content)?,
        None => {
            let mut config = Config::default();
            if let Some(path) = &request.default_database {
                config.database = path.clone();
            }
            config
        }
    };
    if let Some(path) = &request.database {
        config.database = path.clone();
    }
    Ok(config)
}

/// One-shot commands only log warnings unless `-v` is given.
pub(super) fn log_level(config: &Config, long_running: bool, verbosity: u8) -> String {
    match verbosity {
        0 if long_running => config.logging.level.clone(),
        0 => "warn".to_string(),
        1 => "info".to_string(),
        _ => "debug".to_string(),
    }
}

/// Resolve the configuration and open every service on its database.
pub(super) fn open(request: &SessionRequest) -> Result<(Config, Services)> {
    let config = resolve_config(request)?;
    debug!(database = %config.database, "Opening event store");
    let services = Services::from_config(&config)?;
    Ok((config, services))
}
