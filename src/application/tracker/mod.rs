//! Periodic outcome tracker and its settings.

pub mod config;
pub mod service;
