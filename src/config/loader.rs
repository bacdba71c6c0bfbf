//! Config file discovery and parsing.
//!
//! The config file lives at the project root as `.asset-sweep.yaml` (or
//! `.yml`). A missing file is not an error; a present but unparsable file is
//! fatal, because silently ignoring a user's config corrupts results.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::ConfigOverlay;
use crate::error::{Result, ScanError};

const CONFIG_FILENAMES: &[&str] = &[".asset-sweep.yaml", ".asset-sweep.yml"];

/// Load the config overlay from the project root, if a config file exists.
pub fn load_config_overlay(root: &Path) -> Result<Option<ConfigOverlay>> {
    match find_config_file(root) {
        Some(path) => parse_config_file(&path).map(Some),
        None => Ok(None),
    }
}

fn find_config_file(root: &Path) -> Option<PathBuf> {
    CONFIG_FILENAMES
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.is_file())
}

fn parse_config_file(path: &Path) -> Result<ConfigOverlay> {
    debug!(path = %path.display(), "Loading config file");
    let content = fs::read_to_string(path).map_err(|e| ScanError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_yaml::from_str(&content).map_err(|e| ScanError::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })
}
