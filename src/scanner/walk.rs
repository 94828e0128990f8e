//! Directory traversal for kernel projects.
//!
//! Walks each root once, pruning hidden and well-known non-project
//! directories before descending into them. Unreadable entries are logged and
//! skipped so one bad subtree never loses what was already found.

use std::collections::{BTreeSet, HashSet};
use std::ffi::OsStr;
use std::path::PathBuf;

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::expand_home;
use crate::detection::{ProjectQualifier, ProjectRecord, PYPROJECT_FILE};

use super::cancel::CancellationToken;

/// Directory names never descended into, besides hidden ones.
pub const IGNORED_DIRS: &[&str] = &["node_modules", "__pycache__", "site-packages", "target"];

/// What to scan and how to judge candidates.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Root directories, possibly using `~` shorthand.
    pub roots: Vec<PathBuf>,
    /// Directory names pruned from the walk.
    pub ignore: BTreeSet<String>,
    /// Qualification applied to every `pyproject.toml`.
    pub qualifier: ProjectQualifier,
}

impl ScanOptions {
    /// Options for the given roots with the default exclusion set.
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self {
            roots,
            ignore: IGNORED_DIRS.iter().map(|s| s.to_string()).collect(),
            qualifier: ProjectQualifier::new(),
        }
    }

    /// Add directory names to the exclusion set.
    pub fn with_ignored(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.ignore.extend(names.into_iter().map(Into::into));
        self
    }

    /// Whether a directory with this name is skipped.
    pub fn is_pruned(&self, name: &OsStr) -> bool {
        if name.as_encoded_bytes().first() == Some(&b'.') {
            return true;
        }
        name.to_str().is_some_and(|n| self.ignore.contains(n))
    }
}

/// Walk every root and hand each qualifying project to `emit`.
///
/// `emit` returns `false` when nobody is listening anymore, which ends the
/// walk early, as does cancellation. A project reachable from two roots is
/// emitted once. Returns the number of projects emitted.
pub fn walk_roots<F>(options: &ScanOptions, cancel: &CancellationToken, mut emit: F) -> usize
where
    F: FnMut(ProjectRecord) -> bool,
{
    let mut seen: HashSet<PathBuf> = HashSet::new();

    for root in &options.roots {
        let root = expand_home(root);
        if !root.is_dir() {
            info!("Skipping scan root {}: not a directory", root.display());
            continue;
        }

        debug!("Scanning {}", root.display());

        let walker = WalkDir::new(&root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| {
                e.depth() == 0 || !e.file_type().is_dir() || !options.is_pruned(e.file_name())
            });

        for entry in walker {
            if cancel.is_cancelled() {
                debug!("Scan cancelled");
                return seen.len();
            }

            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable path during scan: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_file() || entry.file_name() != PYPROJECT_FILE {
                continue;
            }

            let project_file = entry.into_path();
            if seen.contains(&project_file) || !options.qualifier.qualifies(&project_file) {
                continue;
            }

            debug!("Found kernel project {}", project_file.display());
            seen.insert(project_file.clone());
            if !emit(ProjectRecord::new(project_file)) {
                return seen.len();
            }
        }
    }

    seen.len()
}
