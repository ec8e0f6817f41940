//! Test helpers for event store setup.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::adapter::outbound::sqlite::database::connection::{
    create_pool_with_size, enable_wal, run_migrations,
};
use crate::adapter::outbound::sqlite::store::SqliteEventStore;
use crate::port::outbound::store::EventStore;

/// Build a migrated in-memory store unique to the caller.
///
/// Uses a named shared-cache database behind a single pooled connection, so
/// every checkout sees the same data and the database lives as long as the
/// pool.
pub fn memory_sqlite_store() -> SqliteEventStore {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    let url = format!(
        "file:testkit_{}_{n}?mode=memory&cache=shared",
        std::process::id()
    );
    let pool = create_pool_with_size(&url, 1).expect("in-memory sqlite pool should initialize");
    run_migrations(&pool).expect("migrations should apply");
    SqliteEventStore::new(pool)
}

/// [`memory_sqlite_store`] behind the port trait.
pub fn memory_store() -> Arc<dyn EventStore> {
    Arc::new(memory_sqlite_store())
}

/// Build a migrated WAL-mode store in `dir` with `pool_size` connections.
///
/// Use this for tests that exercise concurrent writers.
pub fn file_store(dir: &Path, pool_size: u32) -> SqliteEventStore {
    let path = dir.join("hindsight-test.db");
    let pool = create_pool_with_size(&path.to_string_lossy(), pool_size)
        .expect("file sqlite pool should initialize");
    run_migrations(&pool).expect("migrations should apply");
    enable_wal(&pool).expect("WAL should enable");
    SqliteEventStore::new(pool)
}
