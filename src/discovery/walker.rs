//! Exclusion-aware directory traversal.
//!
//! Traversal itself is single-threaded so pruning stays deterministic;
//! per-file work is parallelised downstream. Excluded directories are pruned
//! at entry, which keeps the walk linear on large monorepos.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::exclude::{relative_unix, ExcludeSet};

/// What the walk ran into besides the files it yielded.
#[derive(Debug, Default, Clone, Copy)]
pub struct WalkReport {
    /// Entries skipped because they could not be read.
    pub skipped: usize,
    /// Symlink cycles broken (only possible with follow_symlinks).
    pub cycles_broken: usize,
}

/// Walks the project tree yielding regular files not under any exclusion.
pub struct Walker<'a> {
    root: &'a Path,
    exclude: &'a ExcludeSet,
    follow_symlinks: bool,
}

impl<'a> Walker<'a> {
    pub fn new(root: &'a Path, exclude: &'a ExcludeSet, follow_symlinks: bool) -> Self {
        Self {
            root,
            exclude,
            follow_symlinks,
        }
    }

    /// Collect all candidate files. Ordering is not guaranteed and callers
    /// must not depend on it.
    pub fn files(&self) -> (Vec<PathBuf>, WalkReport) {
        let mut files = Vec::new();
        let mut report = WalkReport::default();
        // Canonical paths of directories already entered; guards against
        // symlink cycles when following links.
        let mut visited_dirs: HashSet<PathBuf> = HashSet::new();

        let mut it = WalkDir::new(self.root)
            .follow_links(self.follow_symlinks)
            .into_iter();

        while let Some(entry) = it.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    if err.loop_ancestor().is_some() {
                        report.cycles_broken += 1;
                        warn!(error = %err, "Symlink cycle broken");
                    } else {
                        report.skipped += 1;
                        debug!(error = %err, "Skipping unreadable entry");
                    }
                    continue;
                }
            };

            let relative = relative_unix(self.root, entry.path());

            if entry.file_type().is_dir() {
                if !relative.is_empty() && self.exclude.is_excluded(&relative) {
                    it.skip_current_dir();
                    continue;
                }
                if self.follow_symlinks {
                    match entry.path().canonicalize() {
                        Ok(canonical) => {
                            if !visited_dirs.insert(canonical) {
                                report.cycles_broken += 1;
                                warn!(path = %entry.path().display(), "Directory already visited, breaking cycle");
                                it.skip_current_dir();
                            }
                        }
                        Err(_) => {
                            report.skipped += 1;
                            it.skip_current_dir();
                        }
                    }
                }
                continue;
            }

            if !entry.file_type().is_file() {
                // Symlinks are not followed unless configured; with
                // follow_links on, walkdir already resolves them.
                continue;
            }

            if !self.exclude.is_excluded(&relative) {
                files.push(entry.path().to_path_buf());
            }
        }

        (files, report)
    }
}
