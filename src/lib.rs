//! Hindsight - outcome tracking and scoring for predictive events.
//!
//! A producer records an event (a ticker, a category, and a baseline value)
//! at the moment it makes a prediction. Hindsight then re-prices the event at
//! six fixed horizons (15m, 30m, 1h, 4h, 1d, 7d), classifies each move as a
//! win, loss, or neutral, and derives a momentum score and a weighted final
//! outcome. Read-side analytics aggregate those outcomes by category, ticker,
//! confidence, exit reason, hold duration, and hour of day.
//!
//! # Architecture
//!
//! - [`domain`] - horizons, classification, scoring, and event types
//! - [`port`] - traits for event storage, price lookups, export sinks, and
//!   the operator surface the CLI drives
//! - [`adapter`] - SQLite store, Yahoo/static price providers, JSONL export,
//!   and the CLI
//! - [`application`] - registry, scheduler, updater, tracker, aggregation
//! - [`infrastructure`] - configuration, factories, service wiring, and the
//!   operator implementation
//!
//! # Example
//!
//! ```no_run
//! use hindsight::domain::event::NewEvent;
//! use hindsight::domain::horizon::Horizon;
//! use hindsight::infrastructure::bootstrap::Services;
//! use hindsight::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let services = Services::from_config(&config)?;
//!
//!     let id = services
//!         .registry
//!         .record(NewEvent::new("AAPL", "breakout", 189.5))?;
//!     let result = services.updater.update(&id, Horizon::H1, 191.2)?;
//!     println!("{} {}", result.outcome, result.score);
//!     Ok(())
//! }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
