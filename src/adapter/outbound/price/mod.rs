//! Price provider adapters.
//!
//! Implementations of the [`PriceProvider`](crate::port::outbound::price::PriceProvider) port:
//! a Yahoo Finance HTTP client and a fixed-map provider for tests and dry runs.

pub mod fixed;
pub mod yahoo;
