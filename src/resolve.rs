//! Reference-to-asset resolution.
//!
//! Converts captured textual paths into concrete asset identities via a
//! deterministic ladder: exact join, asset-root joins, then a lazy basename
//! search. Basename resolution is deliberately last; it can cross-match
//! homonyms in different directories, so the segment-aware steps are always
//! preferred, and the fall-back can be disabled entirely in config.

use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::config::ScanConfig;

/// How a captured path resolved against the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A concrete file; the reference attaches to exactly this asset.
    Path(PathBuf),
    /// Resolved only by basename. Every asset sharing the basename records
    /// the reference (a documented limitation, surfaced as an advisory).
    Basename(String),
    /// No existing file matched. The normalised text is kept so the
    /// attachment stage can still try trailing-segment equality; otherwise
    /// the reference is dropped from classification but stays counted.
    Unresolved(String),
}

pub struct PathResolver<'a> {
    root: &'a Path,
    config: &'a ScanConfig,
}

impl<'a> PathResolver<'a> {
    pub fn new(root: &'a Path, config: &'a ScanConfig) -> Self {
        Self { root, config }
    }

    /// Resolve a captured reference text, stopping at the first ladder step
    /// that names an existing file.
    pub fn resolve(&self, matched: &str) -> Resolution {
        let cleaned = self.normalize(matched);
        if cleaned.is_empty() {
            return Resolution::Unresolved(cleaned);
        }

        if let Some(path) = self.try_exact(&cleaned) {
            return Resolution::Path(path);
        }
        if let Some(path) = self.try_asset_roots(&cleaned) {
            return Resolution::Path(path);
        }
        if self.config.basename_fallback {
            if let Some(basename) = self.try_basename(&cleaned) {
                debug!(matched, basename, "Reference resolved by basename only");
                return Resolution::Basename(basename);
            }
        }

        Resolution::Unresolved(cleaned)
    }

    /// Pre-normalise: strip configured base-path variables from the front
    /// (`${ASSET_BASE}/x.png` → `x.png`), then a single leading `./` or `/`.
    fn normalize(&self, matched: &str) -> String {
        let mut text = matched.trim();

        for var in &self.config.base_path_vars {
            for prefix in [format!("${{{var}}}"), format!("${var}")] {
                if let Some(rest) = text.strip_prefix(prefix.as_str()) {
                    text = rest;
                    break;
                }
            }
        }

        let text = text.strip_prefix("./").unwrap_or(text);
        let text = text.strip_prefix('/').unwrap_or(text);
        text.to_string()
    }

    fn try_exact(&self, cleaned: &str) -> Option<PathBuf> {
        let candidate = self.root.join(cleaned);
        candidate.is_file().then_some(candidate)
    }

    fn try_asset_roots(&self, cleaned: &str) -> Option<PathBuf> {
        for asset_root in &self.config.asset_paths {
            let candidate = self.root.join(asset_root).join(cleaned);
            if candidate.is_file() {
                return Some(candidate);
            }

            // The reference may already carry the asset-root prefix.
            if let Some(rest) = cleaned.strip_prefix(asset_root.as_str()) {
                let rest = rest.strip_prefix('/').unwrap_or(rest);
                let candidate = self.root.join(asset_root).join(rest);
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
        }
        None
    }

    /// Lazily walk the asset roots and stop at the first file whose basename
    /// matches. Only existence matters; attachment is by basename so that
    /// duplicate basenames all record the reference.
    fn try_basename(&self, cleaned: &str) -> Option<String> {
        let basename = cleaned.rsplit('/').next().unwrap_or(cleaned);
        if basename.is_empty() {
            return None;
        }

        for asset_root in &self.config.asset_paths {
            let dir = self.root.join(asset_root);
            if !dir.is_dir() {
                continue;
            }
            let found = WalkDir::new(&dir)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .any(|e| e.file_name().to_string_lossy() == basename);
            if found {
                return Some(basename.to_string());
            }
        }
        None
    }
}
