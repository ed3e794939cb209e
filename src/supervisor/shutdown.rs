// src/supervisor/shutdown.rs

//! Graceful-then-forceful retirement of one child process group.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::errors::Result;
use crate::supervisor::child::{ChildHandle, TermSignal};

/// Terminate `child`'s process group and drain its output relays.
///
/// Protocol:
/// 1. SIGTERM to the whole group. Delivery failure is logged and otherwise
///    ignored; the group may already be gone, and the next step escalates
///    regardless.
/// 2. Wait up to `grace` for the leader to exit; on expiry, SIGKILL the
///    group and reap the leader.
/// 3. Join both relays. They end once their streams hit end-of-stream, so
///    the old run's output is fully flushed before the caller spawns the
///    next child.
///
/// If the SIGKILL itself cannot be delivered the group may survive as
/// orphans and the streams may never close; the relays are aborted instead
/// of joined and the caller proceeds. That is a reported, degraded outcome,
/// not a crash.
pub async fn retire_child(
    mut child: ChildHandle,
    relays: Vec<JoinHandle<()>>,
    grace: Duration,
) -> Result<()> {
    if let Err(err) = child.signal(TermSignal::Graceful) {
        debug!(pgid = child.pgid(), error = %err, "graceful signal delivery failed");
    }

    match timeout(grace, child.wait()).await {
        Ok(status) => {
            let status = status?;
            debug!(pgid = child.pgid(), ?status, "child exited within grace period");
        }
        Err(_elapsed) => {
            debug!(pgid = child.pgid(), "grace period elapsed; killing process group");
            if let Err(err) = child.signal(TermSignal::Forceful) {
                warn!(
                    pgid = child.pgid(),
                    error = %err,
                    "kill failed; previous command may survive as an orphan"
                );
                for relay in relays {
                    relay.abort();
                }
                return Ok(());
            }
            let status = child.wait().await?;
            debug!(pgid = child.pgid(), ?status, "child exited after kill");
        }
    }

    for relay in relays {
        let _ = relay.await;
    }

    Ok(())
}
