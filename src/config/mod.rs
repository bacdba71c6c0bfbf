//! Scan configuration: layering, normalisation, and validation.
//!
//! The effective config is produced by stacking, in order of increasing
//! precedence: built-in defaults, project-type defaults, the user's config
//! file, and command-line overrides. List fields are replaced (not
//! concatenated) when a higher layer supplies them non-empty; scalar fields
//! are last-writer-wins.

pub mod defaults;
mod loader;

pub use loader::load_config_overlay;

use serde::{Deserialize, Serialize};

use crate::detector::ProjectType;
use crate::error::{Result, ScanError};

/// Effective scan configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Directories under which assets are expected to live. Order is
    /// presentation-only.
    pub asset_paths: Vec<String>,
    /// Asset extensions, lower-case with leading dot.
    pub extensions: Vec<String>,
    /// Glob patterns for paths to exclude from both traversals.
    pub exclude_paths: Vec<String>,

    /// Files force-included in the reference harvest even when their
    /// extension is outside the pattern provider's filter.
    pub constant_files: Vec<String>,
    /// Variable names stripped from the front of captured reference text
    /// before resolution (e.g. `ASSET_BASE` for `${ASSET_BASE}/x.png`).
    pub base_path_vars: Vec<String>,

    /// Framework override; skips detection when set.
    pub project_type: Option<ProjectType>,
    pub follow_symlinks: bool,
    /// Allow the resolver's basename fall-back (step 3 of the ladder).
    pub basename_fallback: bool,
    /// Worker ceiling for per-file work; 0 means auto.
    pub max_workers: usize,

    pub show_progress: bool,
    pub color_output: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            asset_paths: defaults::default_asset_paths(),
            extensions: defaults::default_extensions(),
            exclude_paths: defaults::default_exclude_paths(),
            constant_files: Vec::new(),
            base_path_vars: Vec::new(),
            project_type: None,
            follow_symlinks: false,
            basename_fallback: true,
            max_workers: 0,
            show_progress: true,
            color_output: true,
        }
    }
}

impl ScanConfig {
    /// Build the effective config for a detected project type by layering
    /// defaults, type defaults, and the given overlays.
    pub fn layered(
        project_type: ProjectType,
        file_overlay: Option<ConfigOverlay>,
        cli_overlay: Option<ConfigOverlay>,
    ) -> Result<Self> {
        let mut config = ScanConfig {
            asset_paths: defaults::asset_paths_for(project_type),
            extensions: defaults::extensions_for(project_type),
            ..ScanConfig::default()
        };

        if let Some(overlay) = file_overlay {
            overlay.apply(&mut config);
        }
        if let Some(overlay) = cli_overlay {
            overlay.apply(&mut config);
        }

        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// Normalise extensions: lower-case, leading dot, duplicates removed.
    fn normalize(&mut self) {
        let mut seen = std::collections::BTreeSet::new();
        let mut normalized = Vec::with_capacity(self.extensions.len());
        for ext in &self.extensions {
            let ext = ext.trim().to_lowercase();
            if ext.is_empty() || ext == "." {
                continue;
            }
            let ext = if ext.starts_with('.') {
                ext
            } else {
                format!(".{ext}")
            };
            if seen.insert(ext.clone()) {
                normalized.push(ext);
            }
        }
        self.extensions = normalized;

        for path in &mut self.asset_paths {
            // Keep asset roots in relative form without trailing slash.
            while path.ends_with('/') {
                path.pop();
            }
        }
    }

    /// Reject configs that cannot produce a meaningful scan.
    fn validate(&self) -> Result<()> {
        if self.asset_paths.is_empty() {
            return Err(ScanError::Config(
                "no asset paths configured after merge".to_string(),
            ));
        }
        if self.extensions.is_empty() {
            return Err(ScanError::Config(
                "no asset extensions configured after merge".to_string(),
            ));
        }
        Ok(())
    }

    /// Worker count to use: the configured ceiling, or hardware threads
    /// capped at 16 when set to auto.
    pub fn effective_workers(&self) -> usize {
        if self.max_workers > 0 {
            return self.max_workers;
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4)
            .min(16)
    }

    /// Whether a file name matches the configured extension set. Matching is
    /// by suffix so compound extensions like `.9.png` work.
    pub fn matches_extension(&self, file_name: &str) -> bool {
        let lower = file_name.to_lowercase();
        self.extensions.iter().any(|ext| lower.ends_with(ext.as_str()))
    }
}

/// Partial configuration, as read from a config file or built from CLI
/// flags. `None` fields leave the lower layer untouched; list fields only
/// replace when non-empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigOverlay {
    pub asset_paths: Option<Vec<String>>,
    pub extensions: Option<Vec<String>>,
    pub exclude_paths: Option<Vec<String>>,
    pub constant_files: Option<Vec<String>>,
    pub base_path_vars: Option<Vec<String>>,
    pub project_type: Option<ProjectType>,
    pub follow_symlinks: Option<bool>,
    pub basename_fallback: Option<bool>,
    pub max_workers: Option<usize>,
    pub show_progress: Option<bool>,
    pub color_output: Option<bool>,
}

impl ConfigOverlay {
    pub fn apply(self, config: &mut ScanConfig) {
        apply_list(self.asset_paths, &mut config.asset_paths);
        apply_list(self.extensions, &mut config.extensions);
        apply_list(self.exclude_paths, &mut config.exclude_paths);
        apply_list(self.constant_files, &mut config.constant_files);
        apply_list(self.base_path_vars, &mut config.base_path_vars);

        if self.project_type.is_some() {
            config.project_type = self.project_type;
        }
        if let Some(v) = self.follow_symlinks {
            config.follow_symlinks = v;
        }
        if let Some(v) = self.basename_fallback {
            config.basename_fallback = v;
        }
        if let Some(v) = self.max_workers {
            config.max_workers = v;
        }
        if let Some(v) = self.show_progress {
            config.show_progress = v;
        }
        if let Some(v) = self.color_output {
            config.color_output = v;
        }
    }
}

fn apply_list(overlay: Option<Vec<String>>, target: &mut Vec<String>) {
    if let Some(values) = overlay {
        if !values.is_empty() {
            *target = values;
        }
    }
}
