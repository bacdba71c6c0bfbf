use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Kind of code site that named an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    Import,
    StringLiteral,
    TemplateLiteral,
    CssUrl,
    HtmlAttribute,
    Constant,
    FunctionCall,
    ConfigDeclaration,
}

impl ReferenceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceKind::Import => "Import",
            ReferenceKind::StringLiteral => "StringLiteral",
            ReferenceKind::TemplateLiteral => "TemplateLiteral",
            ReferenceKind::CssUrl => "CssUrl",
            ReferenceKind::HtmlAttribute => "HtmlAttribute",
            ReferenceKind::Constant => "Constant",
            ReferenceKind::FunctionCall => "FunctionCall",
            ReferenceKind::ConfigDeclaration => "ConfigDeclaration",
        }
    }
}

impl std::fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single location in a source or config file that references an asset.
///
/// Confidence is fixed by the rule that produced the match and never mutated
/// afterwards. The `dynamic` flag marks references whose path appears to be
/// constructed at runtime; any such reference quarantines the asset from
/// automated deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub source_file: PathBuf,
    pub line: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,

    pub matched_text: String,
    pub context: String,

    pub kind: ReferenceKind,
    pub confidence: f32,

    pub in_comment: bool,
    pub dynamic: bool,
}

impl Reference {
    /// Dedup key: references sharing source file, line, and captured text are
    /// the same site found twice.
    pub fn dedup_key(&self) -> (PathBuf, usize, String) {
        (
            self.source_file.clone(),
            self.line,
            self.matched_text.clone(),
        )
    }
}
