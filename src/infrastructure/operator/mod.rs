//! Operator implementations for inbound adapters.

pub mod entry;
pub mod runtime;
pub mod session;
pub mod statistics;
pub mod tracking;

mod shared;
