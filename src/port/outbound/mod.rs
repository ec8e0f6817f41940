//! Outbound ports: persistence, market data, and export.

pub mod export;
pub mod price;
pub mod store;
