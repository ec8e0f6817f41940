//! Component factory functions.
//!
//! Build adapters from [`Config`](crate::infrastructure::config::settings::Config).

pub mod persistence;
pub mod price;
