// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod logging;
pub mod signals;
pub mod supervisor;
pub mod watch;

use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::cli::CliArgs;
use crate::config::RunConfig;
use crate::errors::Result;
use crate::supervisor::Supervisor;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - configuration (CLI flags merged with an optional config file)
/// - the OS-signal → termination-channel bridge
/// - the supervisor restart loop
pub async fn run(args: CliArgs) -> Result<()> {
    let file = config::load_for(&args)?;
    let config = RunConfig::from_sources(&args, file)?;

    debug!(
        cmd = %config.command,
        include = ?config.include,
        verbose = config.verbose,
        "effective configuration"
    );

    // OS signals become one more message in the supervisor's wait step.
    let (stop_tx, stop_rx) = mpsc::channel::<()>(1);
    tokio::spawn(async move {
        match signals::wait_for_termination().await {
            Ok(()) => {
                let _ = stop_tx.send(()).await;
            }
            Err(err) => {
                // Dropping the sender closes the channel, which the
                // supervisor also reads as a shutdown request.
                error!(error = %err, "failed to listen for termination signals");
            }
        }
    });

    let root = std::env::current_dir()?;
    Supervisor::new(config, root, stop_rx).run().await
}
