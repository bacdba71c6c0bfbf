//! Path exclusion matching.
//!
//! Glob matching is authoritative. Basename equality and relative-prefix
//! matching are retained as fall-backs for patterns users write without glob
//! syntax (`legacy/`, `fixtures`). A fixed always-exclude list applies on top
//! of user patterns and cannot be overridden.

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::path::Path;

use crate::config::defaults::ALWAYS_EXCLUDED;
use crate::error::{Result, ScanError};

/// Compiled exclusion rules, matched against root-relative paths with `/`
/// separators.
#[derive(Debug)]
pub struct ExcludeSet {
    globs: GlobSet,
    patterns: Vec<String>,
}

impl ExcludeSet {
    /// Compile user patterns. Every pattern is also compiled with a `/**`
    /// suffix so that directory patterns match their whole subtree. Invalid
    /// globs are fatal.
    pub fn build(patterns: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        let mut kept = Vec::with_capacity(patterns.len());

        for pattern in patterns {
            let trimmed = pattern.trim_end_matches('/');
            if trimmed.is_empty() {
                continue;
            }
            for candidate in [trimmed.to_string(), format!("{trimmed}/**")] {
                // `*` must not cross separators; `**` still does.
                let glob = GlobBuilder::new(&candidate)
                    .literal_separator(true)
                    .build()
                    .map_err(|e| ScanError::InvalidExcludePattern {
                        pattern: pattern.clone(),
                        source: e,
                    })?;
                builder.add(glob);
            }
            kept.push(trimmed.to_string());
        }

        let globs = builder
            .build()
            .map_err(|e| ScanError::InvalidExcludePattern {
                pattern: patterns.join(","),
                source: e,
            })?;

        Ok(Self {
            globs,
            patterns: kept,
        })
    }

    /// Whether a root-relative path (with `/` separators) is excluded.
    pub fn is_excluded(&self, relative: &str) -> bool {
        if relative.is_empty() {
            return false;
        }

        if self.always_excluded(relative) {
            return true;
        }

        // Authoritative check.
        if self.globs.is_match(relative) {
            return true;
        }

        // Fall-backs for non-glob patterns.
        let basename = basename_of(relative);
        for pattern in &self.patterns {
            if basename_of(pattern) == basename {
                return true;
            }
            if relative.starts_with(pattern.as_str())
                && (relative.len() == pattern.len()
                    || relative.as_bytes()[pattern.len()] == b'/')
            {
                return true;
            }
        }

        false
    }

    fn always_excluded(&self, relative: &str) -> bool {
        for entry in ALWAYS_EXCLUDED {
            if entry.contains('/') {
                // Multi-segment entries match as relative prefixes.
                if relative.starts_with(entry)
                    && (relative.len() == entry.len()
                        || relative.as_bytes()[entry.len()] == b'/')
                {
                    return true;
                }
            } else if relative.split('/').any(|segment| segment == *entry) {
                return true;
            }
        }
        false
    }
}

fn basename_of(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Root-relative path with `/` separators, for matching and presentation.
pub fn relative_unix(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    parts.join("/")
}
