// src/config/model.rs

use serde::Deserialize;

/// Optional configuration as read from a TOML file.
///
/// ```toml
/// cmd = "cargo test"
/// include = ["src/**/*.rs", "tests/**/*.rs"]
/// verbose = false
/// ```
///
/// Every key is optional; CLI flags take precedence over file values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    /// Shell command to run, if not given on the command line.
    #[serde(default)]
    pub cmd: Option<String>,

    /// Include glob patterns, if not given on the command line.
    #[serde(default)]
    pub include: Vec<String>,

    /// Default verbosity; `--verbose` on the command line always wins.
    #[serde(default)]
    pub verbose: Option<bool>,
}
