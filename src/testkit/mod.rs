//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`store`] - Migrated SQLite stores: shared-cache in-memory or file-backed.
//! - [`domain`] - Builders for events, exits, and in-memory tracked events.
//! - [`config`] - Canonical test configurations.
//! - [`price`] - Fixed-map price providers.

pub mod config;
pub mod domain;
pub mod price;
pub mod store;
