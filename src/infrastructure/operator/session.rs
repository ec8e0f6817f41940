//! Session operator implementation.

use crate::error::Result;
use crate::port::inbound::operator::session::{SessionOperator, SessionRequest, SessionSnapshot};

use super::{entry::Operator, shared};

impl SessionOperator for Operator {
    fn prepare_session(&self, request: &SessionRequest) -> Result<SessionSnapshot> {
        let mut config = shared::resolve_config(request)?;
        let level = shared::log_level(&config, request.long_running, request.verbosity);
        config.logging = config.logging.clone().with_level(level);
        config.init_logging();

        Ok(SessionSnapshot {
            database: config.database,
            interval_secs: config.tracker.interval_secs,
            max_age_days: config.tracker.max_age_days,
            log_level: config.logging.level,
        })
    }
}
