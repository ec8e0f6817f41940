//! Per-invocation session resolution shared by every command.

use std::path::Path;

use super::command::{Cli, Commands};
use super::operator::read_config_toml;
use super::{output, paths};
use crate::error::Result;
use crate::port::inbound::operator::session::SessionRequest;

/// Build the session request for `cli`.
///
/// An explicit `--config` must exist; otherwise the default file is used if
/// present, else built-in defaults with the database under `~/.hindsight/`.
///
/// # Errors
///
/// Returns an error if a config file cannot be read or the hindsight home
/// directory cannot be created.
pub fn resolve(cli: &Cli) -> Result<SessionRequest> {
    let long_running = matches!(&cli.command, Commands::Run(args) if !args.once);
    let (config_toml, default_database) = config_source(cli.config.as_deref())?;

    Ok(SessionRequest {
        config_toml,
        database: cli.db.as_ref().map(|db| db.to_string_lossy().into_owned()),
        default_database,
        verbosity: output::verbosity(),
        long_running,
    })
}

fn config_source(explicit: Option<&Path>) -> Result<(Option<String>, Option<String>)> {
    if let Some(path) = explicit {
        return Ok((Some(read_config_toml(path)?), None));
    }

    let default_path = paths::default_config();
    if default_path.exists() {
        return Ok((Some(read_config_toml(&default_path)?), None));
    }

    paths::ensure_home_dir()?;
    let database = paths::default_database().to_string_lossy().into_owned();
    Ok((None, Some(database)))
}
