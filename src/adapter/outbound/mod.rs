//! Outbound adapters (driven side).

pub mod export;
pub mod price;
pub mod sqlite;
