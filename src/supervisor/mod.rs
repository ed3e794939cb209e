// src/supervisor/mod.rs

//! The restart control loop.
//!
//! One [`Supervisor`] owns one child process group at a time. Each cycle
//! spawns the command, wires its output through the relays, rebuilds the
//! watch set from the include patterns, and waits for the first reason to
//! stop the child: an external termination request, a qualifying file
//! event, or a watcher fault. The previous child is always fully retired
//! (group signalled, relays drained) before the next one is spawned, so no
//! two executions ever overlap.

pub mod child;
pub mod relay;
pub mod shutdown;

pub use child::{ChildHandle, TermSignal};
pub use shutdown::retire_child;

use std::path::PathBuf;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::RunConfig;
use crate::errors::{Result, WatchrunError};
use crate::supervisor::relay::{spawn_stderr_relay, spawn_stdout_relay};
use crate::watch::{is_restart_event, resolve_watch_set, watch_paths};

/// How long a process group gets to exit after SIGTERM before SIGKILL.
pub const GRACE_PERIOD: Duration = Duration::from_secs(5);

/// Why a cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A watched file changed; start the next cycle.
    Restart,
    /// External termination was requested; no further cycles.
    Shutdown,
}

/// Runs the configured command in a loop, restarting on file changes.
pub struct Supervisor {
    config: RunConfig,
    /// Directory the include patterns are resolved against, normally the
    /// working directory.
    root: PathBuf,
    /// External termination requests, delivered into the wait step as one
    /// more event source (OS signals in production, a plain sender in
    /// tests).
    stop_rx: mpsc::Receiver<()>,
}

impl Supervisor {
    pub fn new(config: RunConfig, root: PathBuf, stop_rx: mpsc::Receiver<()>) -> Self {
        Self {
            config,
            root,
            stop_rx,
        }
    }

    /// Run cycles until external termination or a fatal error.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            match self.run_cycle().await? {
                CycleOutcome::Restart => continue,
                CycleOutcome::Shutdown => {
                    info!("external termination; supervisor exiting");
                    return Ok(());
                }
            }
        }
    }

    /// One full cycle: spawn, watch, wait, retire.
    ///
    /// Fatal errors (glob resolution, watch registration, watcher faults)
    /// propagate without retiring the child explicitly; the spawned command
    /// carries `kill_on_drop` as a backstop and the relays end at
    /// end-of-stream.
    async fn run_cycle(&mut self) -> Result<CycleOutcome> {
        let (child, stdout, stderr) = ChildHandle::spawn(&self.config.command)?;
        info!(pgid = child.pgid(), cmd = %self.config.command, "command started");

        let relays = vec![
            spawn_stdout_relay(stdout, self.config.verbose),
            spawn_stderr_relay(stderr, self.config.verbose),
        ];

        // Re-resolved every cycle so patterns pick up files that appeared
        // since the last run.
        let watch_set = resolve_watch_set(&self.root, &self.config.include)?;
        let mut watch = watch_paths(&watch_set)?;

        let outcome = loop {
            tokio::select! {
                stop = self.stop_rx.recv() => {
                    if stop.is_none() {
                        warn!("termination channel closed; shutting down");
                    } else {
                        debug!("termination request received");
                    }
                    break CycleOutcome::Shutdown;
                }
                msg = watch.recv() => match msg {
                    Some(Ok(event)) if is_restart_event(&event.kind) => {
                        debug!(kind = ?event.kind, paths = ?event.paths, "file change; restarting");
                        break CycleOutcome::Restart;
                    }
                    Some(Ok(event)) => {
                        debug!(kind = ?event.kind, "ignoring event kind");
                    }
                    Some(Err(fault)) => return Err(WatchrunError::WatcherFault(fault)),
                    None => return Err(WatchrunError::WatcherClosed),
                },
            }
        };

        // Retire the old run completely (group signalled, relays drained)
        // before the caller can start the next one; the watcher handle drops
        // with this frame.
        retire_child(child, relays, GRACE_PERIOD).await?;
        Ok(outcome)
    }
}
