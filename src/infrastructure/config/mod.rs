//! Infrastructure configuration modules.

pub mod logging;
pub mod price;
pub mod settings;
