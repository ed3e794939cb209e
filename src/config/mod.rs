// src/config/mod.rs

//! Run configuration: CLI flags merged with an optional TOML file.
//!
//! The merged result is a single immutable [`RunConfig`] value built once at
//! startup and passed by reference into the supervisor; there is no mutable
//! process-wide configuration state.

pub mod loader;
pub mod model;

pub use loader::{default_config_path, load_and_validate, load_from_path};
pub use model::ConfigFile;

use tracing::debug;

use crate::cli::CliArgs;
use crate::errors::{Result, WatchrunError};
use crate::watch::split_include_list;

/// Immutable configuration for the whole supervisor lifetime.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Shell command executed via `sh -c`.
    pub command: String,
    /// Include glob patterns, resolved against the working directory at the
    /// start of every run.
    pub include: Vec<String>,
    /// Tag relayed output lines; also raises the default log level.
    pub verbose: bool,
}

impl RunConfig {
    /// Merge CLI arguments with a config file; flags win per key.
    pub fn from_sources(args: &CliArgs, file: ConfigFile) -> Result<RunConfig> {
        let command = args
            .cmd
            .clone()
            .or(file.cmd)
            .ok_or_else(|| WatchrunError::Config("`--cmd` is a required flag".to_string()))?;

        let include = match &args.include {
            Some(raw) => split_include_list(raw),
            None => file.include,
        };

        let verbose = args.verbose || file.verbose.unwrap_or(false);

        Ok(RunConfig {
            command,
            include,
            verbose,
        })
    }
}

/// Load the config file for this invocation.
///
/// `--config` makes the file mandatory; otherwise `Watchrun.toml` is picked
/// up when it exists and an empty config is used when it doesn't.
pub fn load_for(args: &CliArgs) -> Result<ConfigFile> {
    match &args.config {
        Some(path) => load_and_validate(path),
        None => {
            let path = default_config_path();
            if path.is_file() {
                debug!(?path, "loading default config file");
                load_and_validate(&path)
            } else {
                Ok(ConfigFile::default())
            }
        }
    }
}
