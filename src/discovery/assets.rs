//! Asset discovery: the first of the two traversals.
//!
//! Emits an [`Asset`] for every regular file whose name matches the
//! configured extension set. Metadata comes from a single `stat` per file,
//! parallelised across the worker pool. Unreadable entries are counted and
//! skipped; they never abort the scan.

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

use super::exclude::{relative_unix, ExcludeSet};
use super::walker::{WalkReport, Walker};
use crate::cancel::CancelToken;
use crate::config::ScanConfig;
use crate::model::{Asset, AssetCategory, AssetStatus};

/// Outcome counters from asset discovery.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscoveryReport {
    pub skipped: usize,
    pub cycles_broken: usize,
}

impl From<WalkReport> for DiscoveryReport {
    fn from(report: WalkReport) -> Self {
        Self {
            skipped: report.skipped,
            cycles_broken: report.cycles_broken,
        }
    }
}

pub struct AssetDiscoverer<'a> {
    root: &'a Path,
    config: &'a ScanConfig,
    exclude: &'a ExcludeSet,
}

impl<'a> AssetDiscoverer<'a> {
    pub fn new(root: &'a Path, config: &'a ScanConfig, exclude: &'a ExcludeSet) -> Self {
        Self {
            root,
            config,
            exclude,
        }
    }

    /// Walk the tree and build the asset collection. Emission order is
    /// unspecified.
    pub fn discover(&self, cancel: &CancelToken) -> (Vec<Asset>, DiscoveryReport) {
        let walker = Walker::new(self.root, self.exclude, self.config.follow_symlinks);
        let (files, walk_report) = walker.files();
        let mut report = DiscoveryReport::from(walk_report);

        let stat_failures = AtomicUsize::new(0);
        let assets: Vec<Asset> = files
            .par_iter()
            .filter(|_| !cancel.is_cancelled())
            .filter(|path| self.is_asset_file(path))
            .filter_map(|path| match self.build_asset(path) {
                Some(asset) => Some(asset),
                None => {
                    stat_failures.fetch_add(1, Ordering::Relaxed);
                    None
                }
            })
            .collect();

        report.skipped += stat_failures.into_inner();
        debug!(count = assets.len(), "Asset discovery complete");
        (assets, report)
    }

    fn is_asset_file(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .map(|name| self.config.matches_extension(name))
            .unwrap_or(false)
    }

    fn build_asset(&self, path: &Path) -> Option<Asset> {
        let metadata = match fs::metadata(path) {
            Ok(m) => m,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Skipping unreadable asset");
                return None;
            }
        };

        let name = path.file_name()?.to_string_lossy().into_owned();
        let extension = extension_of(&name);
        let modified = metadata
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| DateTime::<Utc>::UNIX_EPOCH);

        Some(Asset {
            path: path.to_path_buf(),
            relative_path: relative_unix(self.root, path),
            category: AssetCategory::from_extension(&extension),
            name,
            extension,
            size_bytes: metadata.len(),
            modified,
            // Placeholder until classification; status is assigned exactly
            // once, after all references are attached.
            status: AssetStatus::Unused,
            references: Vec::new(),
            reference_count: 0,
        })
    }
}

/// Lower-cased extension including the leading dot (`.png`), empty when the
/// name has none.
fn extension_of(name: &str) -> String {
    match name.rfind('.') {
        Some(idx) if idx > 0 => name[idx..].to_lowercase(),
        _ => String::new(),
    }
}
