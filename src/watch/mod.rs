// src/watch/mod.rs

//! File watching and change detection.
//!
//! This module turns include glob patterns into a concrete watch set (once
//! per run cycle) and filesystem events into restart decisions. It knows
//! nothing about the child process; the supervisor consumes both ends.

pub mod patterns;
pub mod watcher;

pub use patterns::{resolve_watch_set, split_include_list};
pub use watcher::{is_restart_event, watch_paths, WatchHandle};
