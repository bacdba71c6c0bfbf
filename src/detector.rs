//! Project type detection from filesystem markers.
//!
//! Inspects the project root (non-recursively) for characteristic files like
//! `package.json`, `pubspec.yaml`, `go.mod`, and resolves ambiguity by ladder
//! order, not by heuristics.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Detected framework family of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum ProjectType {
    #[serde(rename = "unknown")]
    #[value(name = "unknown")]
    Unknown,
    #[serde(rename = "react")]
    #[value(name = "react")]
    WebReact,
    #[serde(rename = "vue")]
    #[value(name = "vue")]
    WebVue,
    #[serde(rename = "angular")]
    #[value(name = "angular")]
    WebAngular,
    #[serde(rename = "svelte")]
    #[value(name = "svelte")]
    WebSvelte,
    #[serde(rename = "react-native")]
    #[value(name = "react-native")]
    ReactNative,
    #[serde(rename = "flutter")]
    #[value(name = "flutter")]
    Flutter,
    #[serde(rename = "ios")]
    #[value(name = "ios")]
    Ios,
    #[serde(rename = "android")]
    #[value(name = "android")]
    Android,
    #[serde(rename = "go")]
    #[value(name = "go")]
    Go,
    #[serde(rename = "rust")]
    #[value(name = "rust")]
    Rust,
}

impl ProjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Unknown => "Unknown",
            ProjectType::WebReact => "React (Web)",
            ProjectType::WebVue => "Vue (Web)",
            ProjectType::WebAngular => "Angular (Web)",
            ProjectType::WebSvelte => "Svelte (Web)",
            ProjectType::ReactNative => "React Native",
            ProjectType::Flutter => "Flutter",
            ProjectType::Ios => "iOS (Swift)",
            ProjectType::Android => "Android (Kotlin/Java)",
            ProjectType::Go => "Go",
            ProjectType::Rust => "Rust",
        }
    }
}

impl std::fmt::Display for ProjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Minimal `package.json` shape: only the dependency tables matter here.
#[derive(Debug, Default, Deserialize)]
struct PackageManifest {
    #[serde(default)]
    dependencies: HashMap<String, String>,
    #[serde(default, rename = "devDependencies")]
    dev_dependencies: HashMap<String, String>,
}

impl PackageManifest {
    fn has_dependency(&self, name: &str) -> bool {
        self.dependencies.contains_key(name) || self.dev_dependencies.contains_key(name)
    }
}

/// Detect the project type from markers in `root`. First match wins.
pub fn detect_project_type(root: &Path) -> ProjectType {
    let package_json = root.join("package.json");
    if package_json.is_file() {
        // A present but unreadable or malformed package.json degrades to
        // Unknown instead of failing the scan.
        return match read_package_manifest(&package_json) {
            Some(manifest) => detect_from_manifest(&manifest),
            None => {
                debug!(path = %package_json.display(), "Unreadable package.json, degrading to Unknown");
                ProjectType::Unknown
            }
        };
    }

    if root.join("pubspec.yaml").is_file() {
        return ProjectType::Flutter;
    }

    if has_xcode_project(root) {
        return ProjectType::Ios;
    }

    if root.join("build.gradle").is_file()
        || root.join("build.gradle.kts").is_file()
        || root.join("app/build.gradle").is_file()
    {
        return ProjectType::Android;
    }

    if root.join("go.mod").is_file() {
        return ProjectType::Go;
    }

    if root.join("Cargo.toml").is_file() {
        return ProjectType::Rust;
    }

    ProjectType::Unknown
}

fn detect_from_manifest(manifest: &PackageManifest) -> ProjectType {
    // react-native ships with react; check it first.
    if manifest.has_dependency("react-native") {
        ProjectType::ReactNative
    } else if manifest.has_dependency("react") {
        ProjectType::WebReact
    } else if manifest.has_dependency("vue") {
        ProjectType::WebVue
    } else if manifest.has_dependency("@angular/core") {
        ProjectType::WebAngular
    } else if manifest.has_dependency("svelte") {
        ProjectType::WebSvelte
    } else {
        ProjectType::Unknown
    }
}

fn read_package_manifest(path: &Path) -> Option<PackageManifest> {
    let data = fs::read_to_string(path).ok()?;
    serde_json::from_str(&data).ok()
}

/// Any directory immediately under the root whose name ends in `.xcodeproj`.
fn has_xcode_project(root: &Path) -> bool {
    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(_) => return false,
    };

    entries.filter_map(|e| e.ok()).any(|entry| {
        entry.file_type().map(|t| t.is_dir()).unwrap_or(false)
            && entry.file_name().to_string_lossy().ends_with(".xcodeproj")
    })
}
