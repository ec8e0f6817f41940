//! SQLite persistence adapters.
//!
//! Provides the SQLite-backed [`EventStore`](crate::port::outbound::store::EventStore)
//! implementation using Diesel ORM.

pub mod database;
pub mod store;
