//! Command-line adapter.

pub mod command;
pub mod dispatch;
pub mod export;
pub mod observe;
pub mod operator;
pub mod output;
pub mod paths;
pub mod record;
pub mod run;
pub mod session;
pub mod stats;
