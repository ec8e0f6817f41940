//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!     ┌──────────────┤  registry / updater /   ├──────────────┐
//!     │              │  scheduler / tracker    │              │
//!     │              └─────────────────────────┘              │
//!     ▼                                                       ▼
//! ┌─────────────┐                                      ┌───────────────┐
//! │ EventStore  │                                      │ PriceProvider │
//! │  (SQLite)   │                                      │ (HTTP/static) │
//! └─────────────┘                                      └───────────────┘
//! ```

pub mod inbound;
pub mod outbound;
