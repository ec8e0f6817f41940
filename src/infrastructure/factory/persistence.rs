//! Persistence factory for the event store.

use tracing::{debug, warn};

use crate::adapter::outbound::sqlite::database::connection::{
    create_pool, enable_wal, run_migrations,
};
use crate::adapter::outbound::sqlite::store::SqliteEventStore;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Open the configured database, apply migrations, and return the store.
///
/// File-backed databases are switched to WAL so analytics reads never
/// block tracker writes.
pub fn build_store(config: &Config) -> Result<SqliteEventStore> {
    let db_pool = create_pool(&config.database_url())?;
    run_migrations(&db_pool)?;

    if config.database != ":memory:" {
        if let Err(e) = enable_wal(&db_pool) {
            warn!(error = %e, "Failed to enable WAL; continuing with default journal");
        }
    }

    debug!(database = %config.database, "Event store ready");
    Ok(SqliteEventStore::new(db_pool))
}
