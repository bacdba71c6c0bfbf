//! Error types for asset-sweep.
//!
//! Errors fall into two camps: fatal errors that abort the scan (carried by
//! [`ScanError`]) and per-file failures that are logged, counted, and skipped.
//! Only the former appear in function signatures.

use std::path::PathBuf;
use thiserror::Error;

/// Exit category for fatal errors, mapped to process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCategory {
    InvalidArgument,
    NotFound,
    PermissionDenied,
    Internal,
}

impl ExitCategory {
    /// Process exit code for this category.
    pub fn code(&self) -> u8 {
        match self {
            ExitCategory::InvalidArgument => 2,
            ExitCategory::NotFound => 3,
            ExitCategory::PermissionDenied => 4,
            ExitCategory::Internal => 70,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExitCategory::InvalidArgument => "invalid-argument",
            ExitCategory::NotFound => "not-found",
            ExitCategory::PermissionDenied => "permission",
            ExitCategory::Internal => "internal",
        }
    }
}

impl std::fmt::Display for ExitCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fatal error type for scan operations.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("project root does not exist: {0}")]
    RootNotFound(PathBuf),

    #[error("project root is not a directory: {0}")]
    RootNotADirectory(PathBuf),

    #[error("failed to read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid exclusion pattern `{pattern}`: {source}")]
    InvalidExcludePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("invalid reference pattern for {rule}: {source}")]
    InvalidRulePattern {
        rule: &'static str,
        #[source]
        source: regex::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScanError {
    /// The exit category this error maps to.
    pub fn exit_category(&self) -> ExitCategory {
        match self {
            ScanError::RootNotFound(_) => ExitCategory::NotFound,
            ScanError::RootNotADirectory(_) => ExitCategory::InvalidArgument,
            ScanError::ReadError { source, .. } | ScanError::WriteError { source, .. } => {
                if source.kind() == std::io::ErrorKind::PermissionDenied {
                    ExitCategory::PermissionDenied
                } else {
                    ExitCategory::Internal
                }
            }
            ScanError::InvalidExcludePattern { .. }
            | ScanError::Config(_)
            | ScanError::ConfigParse { .. } => ExitCategory::InvalidArgument,
            ScanError::InvalidRulePattern { .. } | ScanError::Json(_) => ExitCategory::Internal,
        }
    }

    /// One-line hint on how to fix the problem, shown alongside the error.
    pub fn remediation(&self) -> &'static str {
        match self {
            ScanError::RootNotFound(_) => "check the path or run from the project directory",
            ScanError::RootNotADirectory(_) => "pass a directory, not a file",
            ScanError::ReadError { .. } => "check file permissions",
            ScanError::WriteError { .. } => "check the output path is writable",
            ScanError::InvalidExcludePattern { .. } => {
                "exclusion patterns must be valid globs, e.g. `legacy/**`"
            }
            ScanError::InvalidRulePattern { .. } => {
                "report this as a bug; built-in rules failed to compile"
            }
            ScanError::Config(_) => "fix the configuration and re-run",
            ScanError::ConfigParse { .. } => "check the YAML syntax of .asset-sweep.yaml",
            ScanError::Json(_) => "report this as a bug",
        }
    }
}

/// Result type alias for fatal scan operations.
pub type Result<T> = std::result::Result<T, ScanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ExitCategory::InvalidArgument.code(), 2);
        assert_eq!(ExitCategory::NotFound.code(), 3);
        assert_eq!(ExitCategory::PermissionDenied.code(), 4);
        assert_eq!(ExitCategory::Internal.code(), 70);
    }

    #[test]
    fn test_root_not_found_category() {
        let err = ScanError::RootNotFound(PathBuf::from("/missing"));
        assert_eq!(err.exit_category(), ExitCategory::NotFound);
        assert!(err.to_string().contains("/missing"));
    }

    #[test]
    fn test_permission_denied_category() {
        let err = ScanError::ReadError {
            path: PathBuf::from("/locked"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.exit_category(), ExitCategory::PermissionDenied);
    }

    #[test]
    fn test_invalid_exclude_pattern_category() {
        let source = globset::Glob::new("a[").unwrap_err();
        let err = ScanError::InvalidExcludePattern {
            pattern: "a[".to_string(),
            source,
        };
        assert_eq!(err.exit_category(), ExitCategory::InvalidArgument);
        assert!(err.to_string().contains("a["));
    }

    #[test]
    fn test_config_error_display() {
        let err = ScanError::Config("no asset extensions configured".to_string());
        assert_eq!(
            err.to_string(),
            "configuration error: no asset extensions configured"
        );
        assert_eq!(err.exit_category(), ExitCategory::InvalidArgument);
    }

    #[test]
    fn test_remediation_is_nonempty() {
        let err = ScanError::RootNotFound(PathBuf::from("/x"));
        assert!(!err.remediation().is_empty());
    }

    #[test]
    fn test_exit_category_display() {
        assert_eq!(ExitCategory::NotFound.to_string(), "not-found");
        assert_eq!(ExitCategory::InvalidArgument.to_string(), "invalid-argument");
    }
}
