//! Scan result cache.
//!
//! Every scan is saved to the user cache directory so downstream review and
//! deletion tooling can reload it without re-scanning:
//! `<cache>/asset-sweep/projects/<hash>/scan-results.json`, where `<hash>` is
//! the first 12 hex characters of the SHA-256 of the canonical project root.

use sha2::{Digest, Sha256};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, ScanError};
use crate::model::ScanResult;

const APP_DIR: &str = "asset-sweep";
const PROJECTS_DIR: &str = "projects";
const RESULTS_FILE: &str = "scan-results.json";
const HASH_LEN: usize = 12;

/// OS cache directory for this tool, if the environment reveals one.
fn user_cache_dir() -> Option<PathBuf> {
    #[cfg(windows)]
    {
        env::var_os("LOCALAPPDATA").map(|d| PathBuf::from(d).join(APP_DIR))
    }
    #[cfg(not(windows))]
    {
        env::var_os("XDG_CACHE_HOME")
            .map(PathBuf::from)
            .or_else(|| env::var_os("HOME").map(|h| PathBuf::from(h).join(".cache")))
            .map(|base| base.join(APP_DIR))
    }
}

/// Stable 12-hex-character key for a project root.
fn project_hash(project_root: &Path) -> String {
    let canonical = project_root
        .canonicalize()
        .unwrap_or_else(|_| project_root.to_path_buf());
    let digest = Sha256::digest(canonical.to_string_lossy().as_bytes());
    digest
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<String>()[..HASH_LEN]
        .to_string()
}

/// Where this project's scan results live, if a cache directory exists.
pub fn results_path(project_root: &Path) -> Option<PathBuf> {
    user_cache_dir().map(|dir| {
        dir.join(PROJECTS_DIR)
            .join(project_hash(project_root))
            .join(RESULTS_FILE)
    })
}

/// Persist a scan result for later review. Returns the path written.
pub fn save(result: &ScanResult) -> Result<PathBuf> {
    let path = results_path(&result.project_root).ok_or_else(|| {
        ScanError::Config("no user cache directory available".to_string())
    })?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ScanError::WriteError {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    fs::write(&path, result.to_json()?).map_err(|e| ScanError::WriteError {
        path: path.clone(),
        source: e,
    })?;
    Ok(path)
}

/// Load a previously saved result, if one exists.
pub fn load(project_root: &Path) -> Result<Option<ScanResult>> {
    let path = match results_path(project_root) {
        Some(path) if path.is_file() => path,
        _ => return Ok(None),
    };
    let data = fs::read_to_string(&path).map_err(|e| ScanError::ReadError {
        path: path.clone(),
        source: e,
    })?;
    ScanResult::from_json(&data).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancel::CancelToken;
    use crate::engine::{run_scan, ScanOptions};
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Tests mutate the cache-dir environment; serialise them.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn with_cache_env<T>(f: impl FnOnce() -> T) -> T {
        let _guard = ENV_LOCK.lock().unwrap();
        f()
    }

    #[test]
    fn test_project_hash_is_stable_and_short() {
        let dir = TempDir::new().unwrap();
        let first = project_hash(dir.path());
        let second = project_hash(dir.path());
        assert_eq!(first, second);
        assert_eq!(first.len(), HASH_LEN);
    }

    #[test]
    fn test_distinct_projects_get_distinct_hashes() {
        let a = TempDir::new().unwrap();
        let b = TempDir::new().unwrap();
        assert_ne!(project_hash(a.path()), project_hash(b.path()));
    }

    #[cfg(unix)]
    #[test]
    fn test_save_and_load_roundtrip() {
        with_cache_env(|| {
            let cache = TempDir::new().unwrap();
            let old = env::var_os("XDG_CACHE_HOME");
            env::set_var("XDG_CACHE_HOME", cache.path());

            let project = TempDir::new().unwrap();
            fs::create_dir_all(project.path().join("assets")).unwrap();
            fs::write(project.path().join("assets/a.png"), "x").unwrap();

            let result =
                run_scan(project.path(), ScanOptions::default(), &CancelToken::new()).unwrap();
            let saved_to = save(&result).unwrap();
            assert!(saved_to.starts_with(cache.path()));

            let loaded = load(project.path()).unwrap().unwrap();
            assert_eq!(result, loaded);

            match old {
                Some(v) => env::set_var("XDG_CACHE_HOME", v),
                None => env::remove_var("XDG_CACHE_HOME"),
            }
        });
    }

    #[cfg(unix)]
    #[test]
    fn test_load_missing_is_none() {
        with_cache_env(|| {
            let cache = TempDir::new().unwrap();
            let old = env::var_os("XDG_CACHE_HOME");
            env::set_var("XDG_CACHE_HOME", cache.path());

            let project = TempDir::new().unwrap();
            assert!(load(project.path()).unwrap().is_none());

            match old {
                Some(v) => env::set_var("XDG_CACHE_HOME", v),
                None => env::remove_var("XDG_CACHE_HOME"),
            }
        });
    }
}
