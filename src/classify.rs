//! Reference attachment and status classification.
//!
//! Attachment maps resolved references onto the asset collection; the
//! classifier then assigns each asset its four-valued status. Conservative
//! by construction: any evidence of runtime path construction quarantines
//! the asset from automated deletion.

use rayon::prelude::*;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::debug;

use crate::model::{Asset, AssetStatus, Reference};
use crate::resolve::{PathResolver, Resolution};

/// Counters from the attachment stage.
#[derive(Debug, Default, Clone, Copy)]
pub struct AttachReport {
    /// References that attached to at least one asset.
    pub attached: usize,
    /// References that attached via the basename fall-back (potential
    /// homonym cross-matches; surfaced as an advisory).
    pub basename_attached: usize,
}

/// Resolve every harvested reference and attach it to the matching assets.
///
/// Resolution (which stats the filesystem) runs on the worker pool; the
/// accumulator is only built after all workers have joined, so attached
/// references are fully visible before classification runs.
pub fn attach_references(
    assets: &mut [Asset],
    references: Vec<Reference>,
    resolver: &PathResolver<'_>,
) -> AttachReport {
    let resolved: Vec<(Resolution, Reference)> = references
        .into_par_iter()
        .map(|reference| (resolver.resolve(&reference.matched_text), reference))
        .collect();

    let mut by_path: HashMap<PathBuf, Vec<Reference>> = HashMap::new();
    let mut by_basename: HashMap<String, Vec<Reference>> = HashMap::new();
    let mut unresolved: Vec<(String, Reference)> = Vec::new();

    for (resolution, reference) in resolved {
        match resolution {
            Resolution::Path(path) => by_path.entry(path).or_default().push(reference),
            Resolution::Basename(name) => {
                by_basename.entry(name).or_default().push(reference)
            }
            Resolution::Unresolved(text) => unresolved.push((text, reference)),
        }
    }

    let mut report = AttachReport::default();

    for asset in assets.iter_mut() {
        // Concrete resolutions move in without copying.
        if let Some(refs) = by_path.remove(&asset.path) {
            report.attached += refs.len();
            asset.attach_all(refs);
        }

        // Basename resolutions attach to every asset sharing the name.
        if let Some(refs) = by_basename.get(&asset.name) {
            report.attached += refs.len();
            report.basename_attached += refs.len();
            asset.attach_all(refs.iter().cloned());
        }

        // Unresolved text still matches by trailing segment.
        for (text, reference) in &unresolved {
            if trailing_segment_matches(&asset.relative_path, &asset.name, text) {
                report.attached += 1;
                asset.attach(reference.clone());
            }
        }
    }

    if report.basename_attached > 0 {
        debug!(
            count = report.basename_attached,
            "References attached by basename only; homonyms may cross-match"
        );
    }
    report
}

fn trailing_segment_matches(relative_path: &str, name: &str, text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    relative_path == text
        || name == text
        || relative_path
            .strip_suffix(text)
            .map(|prefix| prefix.ends_with('/'))
            .unwrap_or(false)
}

/// Assign the status of a single asset from its attached references.
///
/// The dynamic check is first and dominant.
pub fn classify_asset(asset: &Asset) -> AssetStatus {
    if asset.references.iter().any(|r| r.dynamic) {
        return AssetStatus::NeedsManualReview;
    }
    if asset.references.is_empty() {
        return AssetStatus::Unused;
    }
    if asset.references.iter().all(|r| r.in_comment) {
        return AssetStatus::PotentiallyUnused;
    }
    AssetStatus::Used
}

/// Classify every asset. Runs only after all references are attached.
pub fn classify_assets(assets: &mut [Asset]) {
    for asset in assets.iter_mut() {
        asset.status = classify_asset(asset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AssetCategory, ReferenceKind};
    use chrono::Utc;

    fn make_asset(rel: &str) -> Asset {
        Asset {
            path: PathBuf::from(format!("/project/{rel}")),
            relative_path: rel.to_string(),
            name: rel.rsplit('/').next().unwrap().to_string(),
            extension: ".png".to_string(),
            size_bytes: 1,
            modified: Utc::now(),
            category: AssetCategory::Image,
            status: AssetStatus::Unused,
            references: Vec::new(),
            reference_count: 0,
        }
    }

    fn make_ref(in_comment: bool, dynamic: bool) -> Reference {
        Reference {
            source_file: PathBuf::from("src/app.js"),
            line: 1,
            column: None,
            matched_text: "x.png".to_string(),
            context: "ctx".to_string(),
            kind: ReferenceKind::StringLiteral,
            confidence: 0.8,
            in_comment,
            dynamic,
        }
    }

    #[test]
    fn test_no_references_is_unused() {
        let asset = make_asset("a.png");
        assert_eq!(classify_asset(&asset), AssetStatus::Unused);
    }

    #[test]
    fn test_active_reference_is_used() {
        let mut asset = make_asset("a.png");
        asset.attach(make_ref(false, false));
        assert_eq!(classify_asset(&asset), AssetStatus::Used);
    }

    #[test]
    fn test_only_comment_references_is_potentially_unused() {
        let mut asset = make_asset("a.png");
        asset.attach(make_ref(true, false));
        asset.attach(make_ref(true, false));
        assert_eq!(classify_asset(&asset), AssetStatus::PotentiallyUnused);
    }

    #[test]
    fn test_mixed_comment_and_active_is_used() {
        let mut asset = make_asset("a.png");
        asset.attach(make_ref(true, false));
        asset.attach(make_ref(false, false));
        assert_eq!(classify_asset(&asset), AssetStatus::Used);
    }

    #[test]
    fn test_dynamic_dominates_everything() {
        let mut asset = make_asset("a.png");
        asset.attach(make_ref(false, false));
        asset.attach(make_ref(true, true));
        assert_eq!(classify_asset(&asset), AssetStatus::NeedsManualReview);
    }

    #[test]
    fn test_dynamic_comment_reference_still_quarantines() {
        let mut asset = make_asset("a.png");
        asset.attach(make_ref(true, true));
        assert_eq!(classify_asset(&asset), AssetStatus::NeedsManualReview);
    }

    #[test]
    fn test_classify_assets_assigns_all() {
        let mut assets = vec![make_asset("a.png"), make_asset("b.png")];
        assets[1].attach(make_ref(false, false));
        classify_assets(&mut assets);
        assert_eq!(assets[0].status, AssetStatus::Unused);
        assert_eq!(assets[1].status, AssetStatus::Used);
    }

    #[test]
    fn test_trailing_segment_matches() {
        assert!(trailing_segment_matches(
            "src/assets/img/logo.png",
            "logo.png",
            "img/logo.png"
        ));
        assert!(trailing_segment_matches(
            "src/assets/logo.png",
            "logo.png",
            "logo.png"
        ));
        assert!(!trailing_segment_matches(
            "src/assets/biglogo.png",
            "biglogo.png",
            "logo.png"
        ));
        assert!(!trailing_segment_matches("a.png", "a.png", ""));
    }

    mod attachment {
        use super::*;
        use crate::config::ScanConfig;
        use std::fs;
        use tempfile::TempDir;

        fn touch(dir: &std::path::Path, rel: &str) {
            let path = dir.join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "x").unwrap();
        }

        fn asset_at(root: &std::path::Path, rel: &str) -> Asset {
            let mut asset = make_asset(rel);
            asset.path = root.join(rel);
            asset
        }

        fn reference_to(text: &str) -> Reference {
            let mut r = make_ref(false, false);
            r.matched_text = text.to_string();
            r
        }

        #[test]
        fn test_exact_resolution_attaches_to_one_asset() {
            let dir = TempDir::new().unwrap();
            touch(dir.path(), "assets/logo.png");

            let config = ScanConfig {
                asset_paths: vec!["assets".to_string()],
                ..Default::default()
            };
            let resolver = PathResolver::new(dir.path(), &config);
            let mut assets = vec![asset_at(dir.path(), "assets/logo.png")];

            let report = attach_references(
                &mut assets,
                vec![reference_to("assets/logo.png")],
                &resolver,
            );

            assert_eq!(report.attached, 1);
            assert_eq!(report.basename_attached, 0);
            assert_eq!(assets[0].reference_count, 1);
        }

        #[test]
        fn test_basename_resolution_attaches_to_all_homonyms() {
            let dir = TempDir::new().unwrap();
            touch(dir.path(), "assets/a/logo.png");
            touch(dir.path(), "assets/b/logo.png");

            let config = ScanConfig {
                asset_paths: vec!["assets".to_string()],
                ..Default::default()
            };
            let resolver = PathResolver::new(dir.path(), &config);
            let mut assets = vec![
                asset_at(dir.path(), "assets/a/logo.png"),
                asset_at(dir.path(), "assets/b/logo.png"),
            ];

            let report = attach_references(
                &mut assets,
                vec![reference_to("missing/dir/logo.png")],
                &resolver,
            );

            assert_eq!(assets[0].reference_count, 1);
            assert_eq!(assets[1].reference_count, 1);
            assert!(report.basename_attached >= 1);
        }

        #[test]
        fn test_unattached_reference_leaves_assets_unused() {
            let dir = TempDir::new().unwrap();
            touch(dir.path(), "assets/logo.png");

            let config = ScanConfig {
                asset_paths: vec!["assets".to_string()],
                ..Default::default()
            };
            let resolver = PathResolver::new(dir.path(), &config);
            let mut assets = vec![asset_at(dir.path(), "assets/logo.png")];

            attach_references(&mut assets, vec![reference_to("ghost.svg")], &resolver);
            classify_assets(&mut assets);

            assert_eq!(assets[0].status, AssetStatus::Unused);
        }
    }
}
