use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::{Asset, AssetStatus};
use crate::config::ScanConfig;
use crate::detector::ProjectType;
use crate::error::Result;

/// Version of the serialised scan document. Bumped on incompatible changes.
pub const SCHEMA_VERSION: u32 = 1;

/// Statistics computed from the asset collection in a single pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanStats {
    pub total_assets: usize,
    pub total_size_bytes: u64,
    pub used_count: usize,
    pub unused_count: usize,
    /// Bytes reclaimable by deleting every `Unused` asset.
    pub unused_size_bytes: u64,
    pub potentially_unused_count: usize,
    pub needs_review_count: usize,
    pub files_scanned: usize,
    pub references_found: usize,
    /// Source files skipped because they could not be read.
    pub files_skipped: usize,
    pub avg_files_per_sec: f64,
}

/// The four status partitions, borrowed from the asset collection.
///
/// Together the four slices are a partition of the full collection; they are
/// computed strictly from status, in one pass.
#[derive(Debug, Default)]
pub struct StatusPartitions<'a> {
    pub used: Vec<&'a Asset>,
    pub unused: Vec<&'a Asset>,
    pub potentially_unused: Vec<&'a Asset>,
    pub needs_review: Vec<&'a Asset>,
}

/// Complete output of scanning a project. A value object: re-scanning
/// produces a new one, and two scans in the same process never share state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    pub schema_version: u32,
    pub timestamp: DateTime<Utc>,
    pub project_root: PathBuf,
    pub project_type: ProjectType,
    pub duration_ms: u64,
    /// True when the scan was cancelled; the result is well formed but partial.
    #[serde(default)]
    pub aborted: bool,

    pub assets: Vec<Asset>,
    pub stats: ScanStats,
    pub config: ScanConfig,
}

impl ScanResult {
    /// Assets matching the given status.
    pub fn filter_by_status(&self, status: AssetStatus) -> Vec<&Asset> {
        self.assets.iter().filter(|a| a.status == status).collect()
    }

    /// Partition the asset collection by status in a single pass.
    pub fn partitions(&self) -> StatusPartitions<'_> {
        let mut parts = StatusPartitions::default();
        for asset in &self.assets {
            match asset.status {
                AssetStatus::Used => parts.used.push(asset),
                AssetStatus::Unused => parts.unused.push(asset),
                AssetStatus::PotentiallyUnused => parts.potentially_unused.push(asset),
                AssetStatus::NeedsManualReview => parts.needs_review.push(asset),
            }
        }
        parts
    }

    /// Establish a stable presentation order (by relative path). Emission
    /// order during the scan is unspecified; callers that want determinism
    /// in output ask for it here.
    pub fn sort_for_presentation(&mut self) {
        self.assets
            .sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    }

    /// Export as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a previously serialised result.
    pub fn from_json(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }

    /// Export the asset table as CSV.
    pub fn to_csv(&self) -> String {
        let mut out = String::from("Status,Path,Size,Category,References,ModTime\n");
        for asset in &self.assets {
            out.push_str(&format!(
                "{},{},{},{},{},{}\n",
                asset.status,
                csv_escape(&asset.relative_path),
                asset.size_bytes,
                asset.category,
                asset.reference_count,
                asset.modified.to_rfc3339(),
            ));
        }
        out
    }
}

fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
