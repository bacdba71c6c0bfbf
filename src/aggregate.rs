//! Statistics aggregation over the classified asset collection.

use crate::model::{Asset, AssetStatus, ScanStats};

/// Per-scan counters the traversals report alongside their outputs.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScanCounters {
    pub files_scanned: usize,
    /// All harvested references after deduplication, attached or not.
    pub references_found: usize,
    pub files_skipped: usize,
}

/// Compute the statistics block in a single pass over the assets.
pub fn compute_stats(assets: &[Asset], counters: ScanCounters, duration_ms: u64) -> ScanStats {
    let mut stats = ScanStats {
        total_assets: assets.len(),
        files_scanned: counters.files_scanned,
        references_found: counters.references_found,
        files_skipped: counters.files_skipped,
        ..Default::default()
    };

    for asset in assets {
        stats.total_size_bytes += asset.size_bytes;
        match asset.status {
            AssetStatus::Used => stats.used_count += 1,
            AssetStatus::Unused => {
                stats.unused_count += 1;
                stats.unused_size_bytes += asset.size_bytes;
            }
            AssetStatus::PotentiallyUnused => stats.potentially_unused_count += 1,
            AssetStatus::NeedsManualReview => stats.needs_review_count += 1,
        }
    }

    if duration_ms > 0 {
        stats.avg_files_per_sec =
            counters.files_scanned as f64 / (duration_ms as f64 / 1000.0);
    }

    stats
}
