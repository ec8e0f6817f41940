//! Handler for the `stats` command group.

mod format;
mod json;

pub mod handler;
