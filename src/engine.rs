//! Scan orchestration.
//!
//! Runs the full pipeline: root validation, project-type detection, config
//! layering, the two traversals (in parallel over disjoint work), reference
//! resolution and attachment, classification, and aggregation. The result is
//! a value object; a second concurrent scan in the same process is
//! independently correct.

use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

use crate::aggregate::{compute_stats, ScanCounters};
use crate::cancel::CancelToken;
use crate::classify::{attach_references, classify_assets};
use crate::config::{ConfigOverlay, ScanConfig};
use crate::detector::detect_project_type;
use crate::discovery::{AssetDiscoverer, ExcludeSet};
use crate::error::{Result, ScanError};
use crate::harvest::{ProgressCallback, ReferenceHarvester};
use crate::model::{ScanResult, SCHEMA_VERSION};
use crate::patterns::pattern_set_for;
use crate::resolve::PathResolver;

/// Inputs for one scan beyond the project root.
#[derive(Default)]
pub struct ScanOptions {
    /// Overlay loaded from the project's config file, if any.
    pub file_overlay: Option<ConfigOverlay>,
    /// Overlay built from command-line flags, if any.
    pub cli_overlay: Option<ConfigOverlay>,
    /// Per-file progress callback for the harvest pass.
    pub progress: Option<ProgressCallback>,
}

/// Run a complete scan of the project at `root`.
///
/// Fatal configuration and root errors are returned; per-file failures are
/// logged, counted, and never abort the scan. Cancellation yields a
/// well-formed partial result tagged `aborted`.
pub fn run_scan(root: &Path, options: ScanOptions, cancel: &CancelToken) -> Result<ScanResult> {
    if !root.exists() {
        return Err(ScanError::RootNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(ScanError::RootNotADirectory(root.to_path_buf()));
    }
    let root = root.canonicalize().map_err(|e| ScanError::ReadError {
        path: root.to_path_buf(),
        source: e,
    })?;

    // Framework override wins over detection; CLI over config file.
    let override_type = options
        .cli_overlay
        .as_ref()
        .and_then(|o| o.project_type)
        .or_else(|| options.file_overlay.as_ref().and_then(|o| o.project_type));
    let project_type = match override_type {
        Some(t) => t,
        None => detect_project_type(&root),
    };
    info!(project_type = %project_type, root = %root.display(), "Starting scan");

    let config = ScanConfig::layered(project_type, options.file_overlay, options.cli_overlay)?;
    let exclude = ExcludeSet::build(&config.exclude_paths)?;
    let patterns = pattern_set_for(project_type)?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.effective_workers())
        .build()
        .map_err(|e| ScanError::Config(format!("failed to build worker pool: {e}")))?;

    let started = Instant::now();

    let (mut assets, counters) = pool.install(|| {
        let discoverer = AssetDiscoverer::new(&root, &config, &exclude);
        let mut harvester = ReferenceHarvester::new(&root, &config, &exclude, &patterns);
        if let Some(progress) = options.progress {
            harvester = harvester.with_progress(progress);
        }

        // Asset discovery and reference harvesting traverse independently.
        let ((assets, discovery_report), (references, harvest_report)) =
            rayon::join(|| discoverer.discover(cancel), || harvester.harvest(cancel));

        let counters = ScanCounters {
            files_scanned: harvest_report.files_scanned,
            references_found: references.len(),
            files_skipped: discovery_report.skipped + harvest_report.files_skipped,
        };

        let mut assets = assets;
        let resolver = PathResolver::new(&root, &config);
        let attach_report = attach_references(&mut assets, references, &resolver);
        info!(
            attached = attach_report.attached,
            by_basename = attach_report.basename_attached,
            "References attached"
        );

        // All workers have joined; classification sees every reference.
        classify_assets(&mut assets);
        (assets, counters)
    });

    let duration_ms = started.elapsed().as_millis() as u64;
    let stats = compute_stats(&assets, counters, duration_ms);

    if counters.files_skipped > 0 {
        warn!(
            count = counters.files_skipped,
            "Files skipped: access denied or unreadable"
        );
    }

    let mut result = ScanResult {
        schema_version: SCHEMA_VERSION,
        timestamp: chrono::Utc::now(),
        project_root: root,
        project_type,
        duration_ms,
        aborted: cancel.is_cancelled(),
        assets,
        stats,
        config,
    };
    result.sort_for_presentation();
    Ok(result)
}
