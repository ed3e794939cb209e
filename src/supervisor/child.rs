// src/supervisor/child.rs

//! Child process lifecycle: spawn in a fresh process group, signal the
//! whole group, await exit.

use std::process::{ExitStatus, Stdio};

use anyhow::Context;
use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use tokio::process::{Child, ChildStderr, ChildStdout, Command};
use tracing::debug;

use crate::errors::Result;

/// Which signal to deliver to the child's process group.
///
/// The graceful/forceful distinction is the contract; the concrete POSIX
/// signals and the group addressing are implementation details of this
/// module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermSignal {
    /// Request voluntary shutdown (SIGTERM); the child may trap this.
    Graceful,
    /// End the group immediately (SIGKILL).
    Forceful,
}

impl TermSignal {
    fn as_signal(self) -> Signal {
        match self {
            TermSignal::Graceful => Signal::SIGTERM,
            TermSignal::Forceful => Signal::SIGKILL,
        }
    }
}

/// One in-flight execution of the configured command.
///
/// The child leads its own process group, so signals sent through
/// [`ChildHandle::signal`] reach any subprocesses the command spawned while
/// leaving the supervisor untouched.
pub struct ChildHandle {
    child: Child,
    pgid: Pid,
}

impl std::fmt::Debug for ChildHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChildHandle").field("pgid", &self.pgid).finish()
    }
}

impl ChildHandle {
    /// Spawn `sh -c <command>` in a new process group with stdout and
    /// stderr captured. The streams are returned separately so the caller
    /// can hand them to the output relays.
    pub fn spawn(command: &str) -> Result<(ChildHandle, ChildStdout, ChildStderr)> {
        let mut child = Command::new("sh")
            .arg("-c")
            .arg(command)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .process_group(0) // child becomes its own group leader
            .kill_on_drop(true) // backstop when a fatal error unwinds the cycle
            .spawn()
            .with_context(|| format!("spawning `sh -c {command}`"))?;

        // Present until the child is reaped; `process_group(0)` makes the
        // pid double as the group id.
        let pgid = child
            .id()
            .map(|id| Pid::from_raw(id as i32))
            .context("spawned child has no pid")?;

        let stdout = child.stdout.take().context("child stdout pipe missing")?;
        let stderr = child.stderr.take().context("child stderr pipe missing")?;

        Ok((ChildHandle { child, pgid }, stdout, stderr))
    }

    /// Send a signal to the entire process group.
    pub fn signal(&self, sig: TermSignal) -> nix::Result<()> {
        debug!(signal = ?sig, pgid = self.pgid.as_raw(), "signalling process group");
        signal::killpg(self.pgid, sig.as_signal())
    }

    /// Wait for the group leader to exit and reap it.
    pub async fn wait(&mut self) -> std::io::Result<ExitStatus> {
        self.child.wait().await
    }

    /// Process-group id, for diagnostics.
    pub fn pgid(&self) -> i32 {
        self.pgid.as_raw()
    }
}
