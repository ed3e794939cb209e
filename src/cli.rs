// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `watchrun`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "watchrun",
    version,
    about = "Re-run a shell command whenever watched files change.",
    long_about = None
)]
pub struct CliArgs {
    /// Shell command to run and re-run (executed via `sh -c`).
    ///
    /// Required unless the config file provides `cmd`.
    #[arg(long, value_name = "STRING")]
    pub cmd: Option<String>,

    /// Comma-separated glob patterns for files to watch.
    ///
    /// Patterns are resolved relative to the working directory at the start
    /// of every run, so files that appear later are picked up on the next
    /// restart. Empty (the default) watches nothing.
    #[arg(long, value_name = "PATTERNS")]
    pub include: Option<String>,

    /// Verbose diagnostics: flag values, glob matches, signal delivery, and
    /// a tagged copy of every relayed output line.
    #[arg(long)]
    pub verbose: bool,

    /// Path to an optional config file (TOML).
    ///
    /// Default: `Watchrun.toml` in the current working directory, if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `WATCHRUN_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
