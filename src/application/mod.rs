//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters
//! to implement the application's use cases. Each holds an explicit
//! `Arc<dyn EventStore>` handle.

pub mod aggregation;
pub mod registry;
pub mod scheduler;
pub mod tracker;
pub mod updater;
