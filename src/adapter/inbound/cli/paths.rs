//! Path utilities for hindsight.
//!
//! Operator data lives under `~/.hindsight/`:
//! - `~/.hindsight/config.toml` - main configuration
//! - `~/.hindsight/hindsight.db` - default event database for the CLI

use std::path::PathBuf;

/// Returns the hindsight home directory (`~/.hindsight/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".hindsight")
}

/// Returns the default config file path (`~/.hindsight/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}

/// Returns the default database path (`~/.hindsight/hindsight.db`).
pub fn default_database() -> PathBuf {
    home_dir().join("hindsight.db")
}

/// Ensures the hindsight home directory exists.
pub fn ensure_home_dir() -> std::io::Result<()> {
    std::fs::create_dir_all(home_dir())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_under_hindsight_home() {
        assert!(home_dir().to_string_lossy().contains(".hindsight"));
        assert!(default_config().ends_with(".hindsight/config.toml"));
        assert!(default_database().ends_with(".hindsight/hindsight.db"));
    }
}
