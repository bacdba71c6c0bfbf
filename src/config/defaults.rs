//! Built-in and project-type-specific configuration defaults.

use crate::detector::ProjectType;

/// Directories excluded unconditionally, regardless of user configuration.
/// Scanning any of these routinely corrupts results on polyglot projects.
pub const ALWAYS_EXCLUDED: &[&str] = &[
    "node_modules",
    "dist",
    "build",
    ".next",
    "target",
    "vendor",
    ".git",
    "__pycache__",
    "android/app/src/main/res",
    "ios/Runner/Assets.xcassets",
];

pub fn default_asset_paths() -> Vec<String> {
    to_strings(&["assets", "public", "static", "src/assets"])
}

pub fn default_extensions() -> Vec<String> {
    to_strings(&[
        // Images
        ".jpg", ".jpeg", ".png", ".gif", ".svg", ".webp", ".ico", ".bmp",
        // Fonts
        ".ttf", ".woff", ".woff2", ".eot", ".otf",
        // Videos
        ".mp4", ".webm", ".mov", ".avi", ".mkv",
        // Audio
        ".mp3", ".wav", ".ogg", ".m4a", ".flac",
    ])
}

pub fn default_exclude_paths() -> Vec<String> {
    to_strings(&[
        "node_modules/**",
        "dist/**",
        "build/**",
        ".next/**",
        "target/**",
        "vendor/**",
        ".git/**",
    ])
}

/// Default asset roots for a detected project type.
pub fn asset_paths_for(project_type: ProjectType) -> Vec<String> {
    let paths: &[&str] = match project_type {
        ProjectType::WebReact => &["public", "src/assets", "static"],
        ProjectType::WebVue => &["public", "src/assets"],
        ProjectType::WebAngular => &["src/assets"],
        ProjectType::WebSvelte => &["static", "src/assets"],
        ProjectType::ReactNative => &["assets", "src/assets"],
        ProjectType::Flutter => &["assets", "lib/assets"],
        ProjectType::Ios => &["Assets.xcassets", "Resources"],
        ProjectType::Android => &["res/drawable", "res/raw", "assets"],
        ProjectType::Go => &["assets", "static", "web"],
        ProjectType::Rust => &["assets", "static", "resources"],
        ProjectType::Unknown => &["assets", "public", "static"],
    };
    to_strings(paths)
}

/// Default extension set for a detected project type: the common base plus
/// platform-specific additions.
pub fn extensions_for(project_type: ProjectType) -> Vec<String> {
    let mut extensions = to_strings(&[
        ".jpg", ".jpeg", ".png", ".gif", ".svg", ".webp", ".ttf", ".woff", ".woff2", ".mp4",
        ".webm", ".mp3", ".wav", ".ogg",
    ]);

    let extra: &[&str] = match project_type {
        ProjectType::Ios => &[".heic", ".caf", ".aiff"],
        ProjectType::Android => &[".9.png", ".xml"],
        _ => &[],
    };
    extensions.extend(to_strings(extra));
    extensions
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
