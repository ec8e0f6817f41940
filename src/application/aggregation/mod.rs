//! Read-side analytics over tracked events.

pub mod compute;
pub mod engine;
