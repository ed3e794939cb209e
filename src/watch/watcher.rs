// src/watch/watcher.rs

use std::path::PathBuf;

use notify::event::ModifyKind;
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::debug;

use crate::errors::{Result, WatchrunError};

/// Handle for the filesystem watcher of one run cycle.
///
/// Owns the underlying `RecommendedWatcher` so it stays alive as long as the
/// cycle needs it. Dropping the handle stops watching and releases every
/// registered path; the next cycle builds a fresh one from re-resolved
/// patterns.
pub struct WatchHandle {
    _inner: RecommendedWatcher,
    events: mpsc::UnboundedReceiver<notify::Result<Event>>,
}

impl std::fmt::Debug for WatchHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchHandle").finish()
    }
}

impl WatchHandle {
    /// Receive the next watcher message.
    ///
    /// `Some(Ok(event))` is a filesystem event, `Some(Err(fault))` a watcher
    /// fault, and `None` means the event channel closed. The caller treats
    /// the latter two as fatal.
    pub async fn recv(&mut self) -> Option<notify::Result<Event>> {
        self.events.recv().await
    }
}

/// Register every path in the watch set and return the handle.
///
/// Paths are watched non-recursively: the watch set is fixed for the cycle
/// and rebuilt from the include patterns on the next one. A registration
/// failure aborts the run, never a silent skip of an unwatchable path.
pub fn watch_paths(paths: &[PathBuf]) -> Result<WatchHandle> {
    // Channel from the blocking notify callback into the async world.
    let (event_tx, event_rx) = mpsc::unbounded_channel::<notify::Result<Event>>();

    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| {
            // The receiver only disappears when the cycle is torn down;
            // events racing that teardown have nowhere to go.
            let _ = event_tx.send(res);
        },
        Config::default(),
    )
    .map_err(WatchrunError::WatcherFault)?;

    for path in paths {
        watcher
            .watch(path, RecursiveMode::NonRecursive)
            .map_err(|source| WatchrunError::Watch {
                path: path.clone(),
                source,
            })?;
        debug!(path = ?path, "watching path");
    }

    Ok(WatchHandle {
        _inner: watcher,
        events: event_rx,
    })
}

/// Whether a filesystem event should restart the command.
///
/// Creations, removals, data writes and renames qualify; access
/// notifications and metadata-only changes (e.g. chmod) keep the wait going.
pub fn is_restart_event(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Create(_)
            | EventKind::Remove(_)
            | EventKind::Modify(ModifyKind::Data(_))
            | EventKind::Modify(ModifyKind::Name(_))
            | EventKind::Modify(ModifyKind::Any)
    )
}
