//! Reference harvesting: the second traversal.
//!
//! Walks source and config files, applies the provider's rules line by line,
//! and emits candidate references with provenance. Files are processed
//! independently and in parallel; a failure on any single file is logged and
//! that file is skipped. Lines are streamed (never the whole file) to bound
//! memory, and invalid UTF-8 is decoded lossily so regex matching never
//! aborts.

mod ast;

pub use ast::AstPass;

use rayon::prelude::*;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};
use tracing::debug;

use crate::cancel::CancelToken;
use crate::config::ScanConfig;
use crate::discovery::{ExcludeSet, Walker};
use crate::model::{Reference, ReferenceKind};
use crate::patterns::PatternSet;

/// Outcome counters from the harvest.
#[derive(Debug, Default, Clone, Copy)]
pub struct HarvestReport {
    pub files_scanned: usize,
    pub files_skipped: usize,
}

/// Thread-safe per-file progress callback.
pub type ProgressCallback = Arc<dyn Fn() + Send + Sync>;

pub struct ReferenceHarvester<'a> {
    root: &'a Path,
    config: &'a ScanConfig,
    exclude: &'a ExcludeSet,
    patterns: &'a PatternSet,
    progress: Option<ProgressCallback>,
}

impl<'a> ReferenceHarvester<'a> {
    pub fn new(
        root: &'a Path,
        config: &'a ScanConfig,
        exclude: &'a ExcludeSet,
        patterns: &'a PatternSet,
    ) -> Self {
        Self {
            root,
            config,
            exclude,
            patterns,
            progress: None,
        }
    }

    /// Report per-file progress through the given callback.
    pub fn with_progress(mut self, progress: ProgressCallback) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Harvest references from every source file under the root. Emission
    /// order is unspecified.
    pub fn harvest(&self, cancel: &CancelToken) -> (Vec<Reference>, HarvestReport) {
        let walker = Walker::new(self.root, self.exclude, self.config.follow_symlinks);
        let (files, walk_report) = walker.files();

        // Files named in `constant_files` bypass the extension filter.
        let forced: HashSet<PathBuf> = self
            .config
            .constant_files
            .iter()
            .map(|p| self.root.join(p))
            .collect();

        let sources: Vec<&PathBuf> = files
            .iter()
            .filter(|path| self.is_source_file(path) || forced.contains(*path))
            .collect();

        let scanned = AtomicUsize::new(0);
        let skipped = AtomicUsize::new(walk_report.skipped);

        let references: Vec<Reference> = sources
            .par_iter()
            .filter(|_| !cancel.is_cancelled())
            .flat_map(|path| {
                let refs = match self.scan_file(path) {
                    Ok(refs) => {
                        scanned.fetch_add(1, Ordering::Relaxed);
                        refs
                    }
                    Err(e) => {
                        skipped.fetch_add(1, Ordering::Relaxed);
                        debug!(path = %path.display(), error = %e, "Skipping unreadable source file");
                        Vec::new()
                    }
                };
                if let Some(progress) = self.progress.as_deref() {
                    progress();
                }
                refs
            })
            .collect();

        let report = HarvestReport {
            files_scanned: scanned.into_inner(),
            files_skipped: skipped.into_inner(),
        };
        debug!(
            references = references.len(),
            files = report.files_scanned,
            "Reference harvest complete"
        );
        (references, report)
    }

    fn is_source_file(&self, path: &Path) -> bool {
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => return false,
        };
        let extension = match name.rfind('.') {
            Some(idx) if idx > 0 => name[idx..].to_lowercase(),
            _ => return false,
        };
        self.patterns.is_source_extension(&extension)
    }

    /// Scan one file: an AST pass first for JS/TS-like files when the
    /// provider asks for it, then the regex pass. Duplicates from the two
    /// passes are collapsed, keeping the AST hit (it carries the stronger
    /// confidence for the same site).
    pub fn scan_file(&self, path: &Path) -> std::io::Result<Vec<Reference>> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e.to_lowercase()))
            .unwrap_or_default();

        let mut references = Vec::new();

        if self.patterns.wants_ast && matches!(extension.as_str(), ".js" | ".jsx" | ".ts" | ".tsx")
        {
            // AST parse failures degrade silently to regex-only.
            match AstPass::shared().parse_file(path) {
                Ok(ast_refs) => references.extend(ast_refs),
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "AST pass failed, regex only");
                }
            }
        }

        references.extend(self.regex_pass(path, &extension)?);
        Ok(dedup_references(references))
    }

    fn regex_pass(&self, path: &Path, extension: &str) -> std::io::Result<Vec<Reference>> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        let mut references = Vec::new();
        let mut buf = Vec::new();
        let mut line_number = 0;

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line_number += 1;
            let line = String::from_utf8_lossy(&buf);
            let line = line.trim_end_matches(['\n', '\r']);

            let in_comment = is_comment_line(line);
            let dynamic = is_dynamic_line(line);

            for rule in &self.patterns.rules {
                if !rule.applies_to(extension) {
                    continue;
                }
                for captures in rule.regex.captures_iter(line) {
                    let group = match captures.get(rule.capture) {
                        Some(g) => g,
                        None => continue,
                    };
                    let column = Some(group.start() + 1);
                    for text in expand_capture(group.as_str(), rule.list) {
                        if text.is_empty() {
                            continue;
                        }
                        let dynamic = dynamic || text.contains('`');
                        references.push(Reference {
                            source_file: path.to_path_buf(),
                            line: line_number,
                            column,
                            matched_text: text,
                            context: line.trim().to_string(),
                            kind: rule.kind,
                            confidence: rule.confidence,
                            in_comment,
                            dynamic,
                        });
                    }
                }
            }

            // Comments mention paths without quoting them; a bare-token pass
            // keeps that evidence so comment-only assets classify as
            // potentially unused instead of silently dropping to unused.
            if in_comment {
                for captures in comment_path_pattern().captures_iter(line) {
                    let group = captures.get(1).expect("comment pattern has group 1");
                    references.push(Reference {
                        source_file: path.to_path_buf(),
                        line: line_number,
                        column: Some(group.start() + 1),
                        matched_text: group.as_str().to_string(),
                        context: line.trim().to_string(),
                        kind: ReferenceKind::StringLiteral,
                        confidence: 0.6,
                        in_comment: true,
                        dynamic,
                    });
                }
            }
        }

        Ok(references)
    }
}

/// Bare path tokens ending in an asset extension, for comment lines only.
fn comment_path_pattern() -> &'static regex::Regex {
    static PATTERN: OnceLock<regex::Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        regex::Regex::new(&format!(
            "([^\\s\"'`()\\[\\]{{}}]+\\.(?:{}))",
            crate::patterns::ASSET_EXT
        ))
        .expect("comment path pattern: invalid regex")
    })
}

/// Leading-prefix comment test covering the `//`, `/*`, `*` continuation,
/// `#`, and `<!--` families.
pub(crate) fn is_comment_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("//")
        || trimmed.starts_with('#')
        || trimmed.starts_with("/*")
        || trimmed.starts_with('*')
        || trimmed.starts_with("<!--")
}

/// Syntactic markers of runtime path construction: concatenation,
/// interpolation, and join/concat calls.
pub(crate) fn is_dynamic_line(line: &str) -> bool {
    line.contains('+')
        || line.contains("${")
        || line.contains("concat")
        || line.contains("join")
}

/// A list-valued capture (e.g. the body of `styleUrls: [...]`) expands to
/// one item per quoted element; ordinary captures pass through.
fn expand_capture(text: &str, list: bool) -> Vec<String> {
    if !list {
        return vec![text.to_string()];
    }
    static ITEM: OnceLock<regex::Regex> = OnceLock::new();
    let item = ITEM.get_or_init(|| regex::Regex::new(r#"["']([^"']+)["']"#).unwrap());
    item.captures_iter(text)
        .map(|c| c[1].to_string())
        .collect()
}

/// Collapse references sharing (source file, line, captured text); the AST
/// and regex passes otherwise double-count the same site. First wins.
fn dedup_references(references: Vec<Reference>) -> Vec<Reference> {
    let mut seen = HashSet::new();
    references
        .into_iter()
        .filter(|r| seen.insert(r.dedup_key()))
        .collect()
}
