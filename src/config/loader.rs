// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::ConfigFile;
use crate::errors::{Result, WatchrunError};

/// Load a configuration file from a given path.
///
/// This only performs TOML deserialization; use [`load_and_validate`] to
/// also run the semantic checks.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let contents = fs::read_to_string(path.as_ref())?;
    let config: ConfigFile = toml::from_str(&contents)?;
    Ok(config)
}

/// Load a configuration file from path and run basic validation.
///
/// This is the recommended entry point for the rest of the application.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let config = load_from_path(&path)?;
    validate(&config)?;
    Ok(config)
}

fn validate(cfg: &ConfigFile) -> Result<()> {
    if let Some(cmd) = &cfg.cmd {
        if cmd.trim().is_empty() {
            return Err(WatchrunError::Config(
                "`cmd` in the config file must not be empty".to_string(),
            ));
        }
    }
    Ok(())
}

/// Default config path: `Watchrun.toml` in the current working directory.
///
/// Unlike `--config`, the default file is optional; callers check for
/// existence before loading.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Watchrun.toml")
}
