use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::ConfigOverlay;
use crate::detector::ProjectType;

#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[derive(Parser, Debug)]
#[command(
    name = "asset-sweep",
    version,
    about = "Find unused asset files in front-end and mobile projects",
    long_about = "asset-sweep scans a project tree for asset files (images, fonts, audio, video), \
harvests references to them from source and config files, and classifies each asset as used, \
unused, potentially unused, or needing manual review."
)]
pub struct Cli {
    /// Project directory to scan
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Asset extensions to scan, comma separated (e.g. .png,.jpg)
    #[arg(long, value_delimiter = ',')]
    pub extensions: Vec<String>,

    /// Glob patterns for paths to exclude (repeatable)
    #[arg(long = "exclude", value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Asset root directories (repeatable)
    #[arg(long = "asset-path", value_name = "DIR")]
    pub asset_paths: Vec<String>,

    /// Framework override; skips auto-detection
    #[arg(long, value_enum)]
    pub framework: Option<ProjectType>,

    /// Follow symbolic links during traversal
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Disable the basename fall-back when resolving references
    #[arg(long)]
    pub no_basename_match: bool,

    /// Worker ceiling for per-file work (0 = auto)
    #[arg(long, default_value_t = 0)]
    pub max_workers: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Disable the progress display
    #[arg(long)]
    pub no_progress: bool,

    /// Disable coloured output
    #[arg(long)]
    pub no_color: bool,

    /// Suppress informational messages
    #[arg(short, long)]
    pub quiet: bool,

    /// Show per-reference detail in the report
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Convert the flags into a config overlay (the highest-precedence
    /// layer). Unset flags leave the lower layers untouched.
    pub fn overlay(&self) -> ConfigOverlay {
        ConfigOverlay {
            asset_paths: non_empty(&self.asset_paths),
            extensions: non_empty(&self.extensions),
            exclude_paths: non_empty(&self.exclude),
            constant_files: None,
            base_path_vars: None,
            project_type: self.framework,
            follow_symlinks: self.follow_symlinks.then_some(true),
            basename_fallback: self.no_basename_match.then_some(false),
            max_workers: (self.max_workers > 0).then_some(self.max_workers),
            show_progress: self.no_progress.then_some(false),
            color_output: self.no_color.then_some(false),
        }
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            path: PathBuf::from("."),
            extensions: Vec::new(),
            exclude: Vec::new(),
            asset_paths: Vec::new(),
            framework: None,
            follow_symlinks: false,
            no_basename_match: false,
            max_workers: 0,
            format: OutputFormat::Text,
            output: None,
            no_progress: false,
            no_color: false,
            quiet: false,
            verbose: false,
        }
    }
}

fn non_empty(values: &[String]) -> Option<Vec<String>> {
    (!values.is_empty()).then(|| values.to_vec())
}
