use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::Reference;

/// Category of an asset, derived from its file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetCategory {
    Image,
    Font,
    Video,
    Audio,
    Other,
}

impl AssetCategory {
    /// Determine the category from a lower-cased extension including the dot.
    pub fn from_extension(ext: &str) -> Self {
        match ext {
            ".jpg" | ".jpeg" | ".png" | ".gif" | ".svg" | ".webp" | ".ico" | ".bmp" | ".heic" => {
                AssetCategory::Image
            }
            ".ttf" | ".woff" | ".woff2" | ".eot" | ".otf" => AssetCategory::Font,
            ".mp4" | ".webm" | ".mov" | ".avi" | ".mkv" => AssetCategory::Video,
            ".mp3" | ".wav" | ".ogg" | ".m4a" | ".flac" | ".caf" | ".aiff" => AssetCategory::Audio,
            _ => AssetCategory::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetCategory::Image => "Image",
            AssetCategory::Font => "Font",
            AssetCategory::Video => "Video",
            AssetCategory::Audio => "Audio",
            AssetCategory::Other => "Other",
        }
    }
}

impl std::fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Usage status of an asset. Assigned exactly once per scan, after all
/// references have been attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetStatus {
    Used,
    Unused,
    PotentiallyUnused,
    NeedsManualReview,
}

impl AssetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetStatus::Used => "Used",
            AssetStatus::Unused => "Unused",
            AssetStatus::PotentiallyUnused => "PotentiallyUnused",
            AssetStatus::NeedsManualReview => "NeedsManualReview",
        }
    }
}

impl std::fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single asset file discovered in the project.
///
/// `path` is absolute and unique across the asset set. `relative_path` always
/// uses `/` as separator regardless of platform, for presentation and for the
/// serialised document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub path: PathBuf,
    pub relative_path: String,
    pub name: String,
    pub extension: String,

    pub size_bytes: u64,
    pub modified: DateTime<Utc>,

    pub category: AssetCategory,
    pub status: AssetStatus,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<Reference>,
    pub reference_count: usize,
}

impl Asset {
    /// Attach a reference and keep the cached count in sync.
    pub fn attach(&mut self, reference: Reference) {
        self.references.push(reference);
        self.reference_count = self.references.len();
    }

    /// Attach several references at once.
    pub fn attach_all(&mut self, references: impl IntoIterator<Item = Reference>) {
        self.references.extend(references);
        self.reference_count = self.references.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ReferenceKind;

    fn sample_asset() -> Asset {
        Asset {
            path: PathBuf::from("/project/assets/logo.png"),
            relative_path: "assets/logo.png".to_string(),
            name: "logo.png".to_string(),
            extension: ".png".to_string(),
            size_bytes: 1024,
            modified: Utc::now(),
            category: AssetCategory::Image,
            status: AssetStatus::Unused,
            references: Vec::new(),
            reference_count: 0,
        }
    }

    fn sample_reference() -> Reference {
        Reference {
            source_file: PathBuf::from("/project/src/App.tsx"),
            line: 1,
            column: None,
            matched_text: "./assets/logo.png".to_string(),
            context: "import logo from \"./assets/logo.png\";".to_string(),
            kind: ReferenceKind::Import,
            confidence: 1.0,
            in_comment: false,
            dynamic: false,
        }
    }

    #[test]
    fn test_category_from_extension() {
        assert_eq!(AssetCategory::from_extension(".png"), AssetCategory::Image);
        assert_eq!(AssetCategory::from_extension(".woff2"), AssetCategory::Font);
        assert_eq!(AssetCategory::from_extension(".mp4"), AssetCategory::Video);
        assert_eq!(AssetCategory::from_extension(".flac"), AssetCategory::Audio);
        assert_eq!(AssetCategory::from_extension(".pdf"), AssetCategory::Other);
    }

    #[test]
    fn test_category_display() {
        assert_eq!(AssetCategory::Image.to_string(), "Image");
        assert_eq!(AssetCategory::Other.to_string(), "Other");
    }

    #[test]
    fn test_status_display() {
        assert_eq!(AssetStatus::Used.to_string(), "Used");
        assert_eq!(
            AssetStatus::NeedsManualReview.to_string(),
            "NeedsManualReview"
        );
    }

    #[test]
    fn test_attach_keeps_count_in_sync() {
        let mut asset = sample_asset();
        assert_eq!(asset.reference_count, 0);

        asset.attach(sample_reference());
        assert_eq!(asset.reference_count, 1);
        assert_eq!(asset.references.len(), 1);

        asset.attach_all(vec![sample_reference(), sample_reference()]);
        assert_eq!(asset.reference_count, 3);
        assert_eq!(asset.references.len(), 3);
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&AssetStatus::PotentiallyUnused).unwrap();
        assert_eq!(json, "\"potentially_unused\"");
        let back: AssetStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, AssetStatus::PotentiallyUnused);
    }

    #[test]
    fn test_empty_references_not_serialized() {
        let asset = sample_asset();
        let json = serde_json::to_string(&asset).unwrap();
        assert!(!json.contains("\"references\""));
        assert!(json.contains("\"reference_count\":0"));
    }
}
