//! Deeper pass for JavaScript/TypeScript files.
//!
//! Recognises the constructs a line regex over generic rules misses or
//! under-scores: static and dynamic imports (including the webpack
//! magic-comment form), JSX image attributes, object-literal property values,
//! and asset-valued re-exports. Hits from this pass carry the confidence the
//! construct deserves and win deduplication against the regex pass.

use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::OnceLock;

use super::{is_comment_line, is_dynamic_line};
use crate::model::{Reference, ReferenceKind};
use crate::patterns::MEDIA_EXT;

struct AstRule {
    kind: ReferenceKind,
    regex: Regex,
    confidence: f32,
}

/// The compiled deep-pass patterns, built once per process.
pub struct AstPass {
    rules: Vec<AstRule>,
}

impl AstPass {
    /// Shared instance; patterns are static and compile-checked by test.
    pub fn shared() -> &'static AstPass {
        static SHARED: OnceLock<AstPass> = OnceLock::new();
        SHARED.get_or_init(AstPass::new)
    }

    fn new() -> Self {
        let rule = |kind, pattern: String, confidence| AstRule {
            kind,
            regex: Regex::new(&pattern).expect("ast pattern: invalid regex"),
            confidence,
        };

        Self {
            rules: vec![
                // import foo from './image.png' / import * as img from ...
                rule(
                    ReferenceKind::Import,
                    format!(
                        r#"import\s+(?:\*\s+as\s+\w+|\{{[^}}]+\}}|\w+)\s+from\s+["']([^"']+\.(?:{MEDIA_EXT}))["']"#
                    ),
                    1.0,
                ),
                // import('./image.png') or import(/* chunk */ './image.png')
                rule(
                    ReferenceKind::Import,
                    format!(
                        r#"import\s*\(\s*(?:/\*.*?\*/\s*)?["']([^"']+\.(?:{MEDIA_EXT}))["']"#
                    ),
                    1.0,
                ),
                // <img src="./logo.png" />
                rule(
                    ReferenceKind::HtmlAttribute,
                    r#"<img[^>]+src\s*=\s*["']([^"']+\.(?:jpg|jpeg|png|gif|svg|webp|ico))["']"#
                        .to_string(),
                    0.95,
                ),
                // <img src={require('./logo.png')} />
                rule(
                    ReferenceKind::Import,
                    r#"<[^>]+(?:src|href)\s*=\s*\{require\s*\(\s*["']([^"']+\.(?:jpg|jpeg|png|gif|svg|webp))["']"#
                        .to_string(),
                    0.95,
                ),
                // { logo: './image.png' } or { bg: require('./bg.jpg') }
                rule(
                    ReferenceKind::StringLiteral,
                    r#"\{\s*\w+\s*:\s*(?:require\s*\(\s*)?["']([^"']+\.(?:jpg|jpeg|png|gif|svg|webp|ttf|woff|mp4))["']"#
                        .to_string(),
                    0.85,
                ),
                // export { default as Logo } from './logo.png'
                rule(
                    ReferenceKind::Import,
                    r#"export\s+(?:\{[^}]+\}|default)\s+from\s+["']([^"']+\.(?:jpg|jpeg|png|gif|svg|webp|ttf|woff))["']"#
                        .to_string(),
                    1.0,
                ),
            ],
        }
    }

    /// Parse one file, streaming line by line.
    pub fn parse_file(&self, path: &Path) -> std::io::Result<Vec<Reference>> {
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
            // Back-tick presence counts as dynamic here: a path assembled
            // next to a template literal is not trustworthy evidence.
            let dynamic = is_dynamic_line(line) || line.contains('`');

            for rule in &self.rules {
                for captures in rule.regex.captures_iter(line) {
                    let text = match captures.get(1) {
                        Some(g) if !g.as_str().is_empty() => g.as_str().to_string(),
                        _ => continue,
                    };
                    references.push(Reference {
                        source_file: path.to_path_buf(),
                        line: line_number,
                        column: None,
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

        Ok(references)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn parse(content: &str) -> Vec<Reference> {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mod.tsx");
        fs::write(&path, content).unwrap();
        AstPass::shared().parse_file(&path).unwrap()
    }

    #[test]
    fn test_patterns_compile() {
        // Force construction; a malformed pattern panics here, not mid-scan.
        let _ = AstPass::shared();
    }

    #[test]
    fn test_static_import() {
        let refs = parse("import logo from './logo.png';\n");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].kind, ReferenceKind::Import);
        assert_eq!(refs[0].matched_text, "./logo.png");
        assert_eq!(refs[0].confidence, 1.0);
    }

    #[test]
    fn test_namespace_import() {
        let refs = parse("import * as bg from \"../img/bg.webp\";\n");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].matched_text, "../img/bg.webp");
    }

    #[test]
    fn test_dynamic_import_with_magic_comment() {
        let refs = parse("const p = import(/* webpackChunkName: \"x\" */ './big.jpg');\n");
        assert!(refs.iter().any(|r| r.matched_text == "./big.jpg"));
    }

    #[test]
    fn test_jsx_img_src() {
        let refs = parse("<img className=\"logo\" src=\"./assets/logo.svg\" />\n");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].kind, ReferenceKind::HtmlAttribute);
    }

    #[test]
    fn test_jsx_require() {
        let refs = parse("<img src={require('./assets/icon.png')} />\n");
        assert!(refs
            .iter()
            .any(|r| r.kind == ReferenceKind::Import && r.matched_text == "./assets/icon.png"));
    }

    #[test]
    fn test_object_property() {
        let refs = parse("const theme = { banner: './img/banner.jpg' };\n");
        assert!(refs
            .iter()
            .any(|r| r.kind == ReferenceKind::StringLiteral && r.confidence == 0.85));
    }

    #[test]
    fn test_reexport() {
        let refs = parse("export { default as Logo } from './logo.png';\n");
        assert!(refs.iter().any(|r| r.kind == ReferenceKind::Import));
    }

    #[test]
    fn test_line_numbers_track() {
        let refs = parse("const a = 1;\nimport x from './x.png';\n");
        assert_eq!(refs[0].line, 2);
    }

    #[test]
    fn test_comment_flag() {
        let refs = parse("// import x from './x.png';\n");
        assert_eq!(refs.len(), 1);
        assert!(refs[0].in_comment);
    }
}
