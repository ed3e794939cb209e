// src/watch/patterns.rs

use std::path::{Path, PathBuf};

use anyhow::Context;
use globset::{GlobBuilder, GlobMatcher};
use tracing::debug;

use crate::errors::{Result, WatchrunError};

/// Split a comma-separated include list into individual patterns.
///
/// Mirrors the flag syntax: `--include "src/**/*.rs,tests/**"`. An empty
/// string yields one empty pattern, which matches nothing.
pub fn split_include_list(raw: &str) -> Vec<String> {
    raw.split(',').map(|s| s.to_string()).collect()
}

/// Resolve include patterns into the concrete set of paths to watch.
///
/// Walks `root` once per pattern and collects every file or directory whose
/// root-relative path matches, sorted within each pattern. This runs at the
/// start of every cycle, not once at startup: files that appeared since the
/// last run are picked up without restarting the supervisor itself.
///
/// Empty patterns match nothing. An invalid pattern is an error, as is a
/// directory that cannot be read during the walk; a broken watch set is
/// never silently truncated.
pub fn resolve_watch_set(root: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for pattern in patterns {
        if pattern.is_empty() {
            debug!("skipping empty include pattern");
            continue;
        }

        // `*` stays within one path segment; `**` crosses directories.
        let matcher = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|source| WatchrunError::Pattern {
                pattern: pattern.clone(),
                source,
            })?
            .compile_matcher();

        let mut matches = collect_matches(root, &matcher)?;
        matches.sort();

        debug!(pattern = %pattern, count = matches.len(), "include pattern resolved");
        for path in &matches {
            debug!(path = ?path, "glob match");
        }

        paths.extend(matches);
    }

    Ok(paths)
}

/// Walk `root` and return every entry whose root-relative path matches.
///
/// Directories are eligible matches themselves (watching one covers its
/// direct children for the rest of the cycle) and are always descended into
/// while collecting.
fn collect_matches(root: &Path, matcher: &GlobMatcher) -> Result<Vec<PathBuf>> {
    let mut matches = Vec::new();
    let mut stack = vec![root.to_path_buf()];

    while let Some(dir) = stack.pop() {
        let entries =
            std::fs::read_dir(&dir).with_context(|| format!("reading dir {:?}", dir))?;
        for entry in entries {
            let path = entry.with_context(|| format!("reading dir entry in {:?}", dir))?.path();

            if let Ok(rel) = path.strip_prefix(root) {
                let rel_str = rel.to_string_lossy().replace('\\', "/");
                if matcher.is_match(&rel_str) {
                    matches.push(path.clone());
                }
            }

            if path.is_dir() {
                stack.push(path);
            }
        }
    }

    Ok(matches)
}
