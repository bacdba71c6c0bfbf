//! Reference-matching rules, kept as data and compiled once per scan.
//!
//! Each rule is a tuple of kind, pattern source, capture index, confidence,
//! and an optional source-extension filter. Framework providers compose a
//! framework-specific head with the generic tail; dispatch is by the detected
//! [`ProjectType`]. Compilation happens up front and fails fast on a
//! malformed pattern.

mod angular;
mod flutter;
mod generic;
mod react;
mod svelte;
mod vue;

use regex::Regex;

use crate::detector::ProjectType;
use crate::error::{Result, ScanError};
use crate::model::ReferenceKind;

// Extension alternations shared by the pattern builders.
pub(crate) const ASSET_EXT: &str =
    "jpg|jpeg|png|gif|svg|webp|ico|bmp|ttf|woff|woff2|eot|otf|mp4|webm|mov|avi|mkv|mp3|wav|ogg|m4a|flac";
pub(crate) const MEDIA_EXT: &str = "jpg|jpeg|png|gif|svg|webp|ttf|woff|woff2|mp4|mp3";
pub(crate) const IMAGE_EXT: &str = "jpg|jpeg|png|gif|svg|webp|ico";
pub(crate) const STYLE_EXT: &str = "jpg|jpeg|png|gif|svg|webp|ttf|woff|woff2|eot|otf";
pub(crate) const MARKUP_EXT: &str = "jpg|jpeg|png|gif|svg|webp|mp4|webm|mp3|wav";

/// Source file extensions recognised regardless of provider, so polyglot
/// projects still get their config and platform files harvested.
pub const COMMON_SOURCE_EXTENSIONS: &[&str] = &[
    ".js", ".jsx", ".ts", ".tsx", ".vue", ".svelte", ".css", ".scss", ".sass", ".less", ".html",
    ".htm", ".dart", ".yaml", ".swift", ".kt", ".java", ".go", ".rs",
];

/// One reference-matching rule, as data.
#[derive(Debug, Clone)]
pub struct RuleSpec {
    /// Stable rule name, used in compile errors and nowhere else.
    pub name: &'static str,
    pub kind: ReferenceKind,
    pub pattern: String,
    /// Index of the capture group holding the asset path.
    pub capture: usize,
    pub confidence: f32,
    /// Source extensions this rule applies to; empty means the provider's
    /// whole extension set.
    pub extensions: &'static [&'static str],
    /// The capture holds a quoted list (e.g. `styleUrls: [...]`); the
    /// harvester expands it into one reference per element.
    pub list: bool,
}

impl RuleSpec {
    pub fn new(
        name: &'static str,
        kind: ReferenceKind,
        pattern: String,
        confidence: f32,
    ) -> Self {
        Self {
            name,
            kind,
            pattern,
            capture: 1,
            confidence,
            extensions: &[],
            list: false,
        }
    }

    pub fn with_extensions(mut self, extensions: &'static [&'static str]) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn as_list(mut self) -> Self {
        self.list = true;
        self
    }
}

/// A compiled rule.
#[derive(Debug)]
pub struct Rule {
    pub name: &'static str,
    pub kind: ReferenceKind,
    pub regex: Regex,
    pub capture: usize,
    pub confidence: f32,
    pub extensions: &'static [&'static str],
    pub list: bool,
}

impl Rule {
    fn compile(spec: RuleSpec) -> Result<Self> {
        let regex = Regex::new(&spec.pattern).map_err(|e| ScanError::InvalidRulePattern {
            rule: spec.name,
            source: e,
        })?;
        Ok(Self {
            name: spec.name,
            kind: spec.kind,
            regex,
            capture: spec.capture,
            confidence: spec.confidence,
            extensions: spec.extensions,
            list: spec.list,
        })
    }

    /// Whether this rule applies to a file with the given extension.
    pub fn applies_to(&self, extension: &str) -> bool {
        self.extensions.is_empty() || self.extensions.contains(&extension)
    }
}

/// What a provider contributes: its rules, the source extensions it wants
/// scanned, and whether the AST pass should complement regex matching.
pub struct ProviderSpec {
    pub rules: Vec<RuleSpec>,
    pub source_extensions: &'static [&'static str],
    pub wants_ast: bool,
}

/// The compiled pattern set handed to the harvester.
pub struct PatternSet {
    pub rules: Vec<Rule>,
    pub source_extensions: &'static [&'static str],
    pub wants_ast: bool,
}

impl PatternSet {
    fn compile(provider: ProviderSpec) -> Result<Self> {
        let rules = provider
            .rules
            .into_iter()
            .map(Rule::compile)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            rules,
            source_extensions: provider.source_extensions,
            wants_ast: provider.wants_ast,
        })
    }

    /// Whether a file with this extension should be harvested at all.
    pub fn is_source_extension(&self, extension: &str) -> bool {
        self.source_extensions.contains(&extension)
            || COMMON_SOURCE_EXTENSIONS.contains(&extension)
    }
}

/// Compile the pattern set for a project type. Framework families without a
/// dedicated provider fall back to the generic one.
pub fn pattern_set_for(project_type: ProjectType) -> Result<PatternSet> {
    let provider = match project_type {
        ProjectType::WebReact | ProjectType::ReactNative => react::provider(),
        ProjectType::WebAngular => angular::provider(),
        ProjectType::WebVue => vue::provider(),
        ProjectType::Flutter => flutter::provider(),
        ProjectType::WebSvelte => svelte::provider(),
        _ => generic::provider(),
    };
    PatternSet::compile(provider)
}
