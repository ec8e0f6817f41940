//! Storage-agnostic domain logic: horizons, classification, composites.

pub mod error;
pub mod event;
pub mod horizon;
pub mod id;
pub mod outcome;
pub mod score;
pub mod stats;
pub mod window;
