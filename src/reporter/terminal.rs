use colored::Colorize;

use super::{human_size, Reporter};
use crate::model::{Asset, ScanResult};

pub struct TerminalReporter {
    verbose: bool,
}

impl TerminalReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    fn section(&self, out: &mut String, title: &str, assets: &[&Asset]) {
        if assets.is_empty() {
            return;
        }
        out.push_str(&format!("\n{} ({})\n", title.bold(), assets.len()));
        for asset in assets {
            out.push_str(&format!(
                "  {}  {}\n",
                asset.relative_path,
                human_size(asset.size_bytes).dimmed()
            ));
            if self.verbose {
                for reference in &asset.references {
                    out.push_str(&format!(
                        "      {}:{}  {}\n",
                        reference.source_file.display(),
                        reference.line,
                        reference.context.dimmed()
                    ));
                }
            }
        }
    }
}

impl Reporter for TerminalReporter {
    fn report(&self, result: &ScanResult) -> String {
        let mut out = String::new();

        out.push_str(&format!(
            "{}\n",
            format!("asset-sweep v{}", env!("CARGO_PKG_VERSION")).bold()
        ));
        out.push_str(&format!(
            "Project: {} ({})\n",
            result.project_root.display(),
            result.project_type
        ));
        if result.aborted {
            out.push_str(&format!("{}\n", "Scan was cancelled; results are partial.".yellow()));
        }

        let parts = result.partitions();
        self.section(&mut out, "Unused", &parts.unused);
        self.section(&mut out, "Potentially unused (comment-only)", &parts.potentially_unused);
        self.section(&mut out, "Needs manual review (dynamic)", &parts.needs_review);
        if self.verbose {
            self.section(&mut out, "Used", &parts.used);
        }

        let stats = &result.stats;
        out.push_str(&format!("\n{}\n", "─".repeat(50)));
        out.push_str(&format!(
            "{} assets ({}) · {} files scanned · {} references · {} ms\n",
            stats.total_assets,
            human_size(stats.total_size_bytes),
            stats.files_scanned,
            stats.references_found,
            result.duration_ms
        ));
        out.push_str(&format!(
            "{}: {} used · {} unused · {} potentially unused · {} needs review\n",
            "Status".bold(),
            stats.used_count.to_string().green(),
            stats.unused_count.to_string().red().bold(),
            stats.potentially_unused_count.to_string().yellow(),
            stats.needs_review_count.to_string().cyan()
        ));
        out.push_str(&format!(
            "Reclaimable: {}\n",
            human_size(stats.unused_size_bytes).red().bold()
        ));
        if stats.files_skipped > 0 {
            out.push_str(&format!(
                "{}\n",
                format!("{} files skipped: access denied or unreadable", stats.files_skipped)
                    .yellow()
            ));
        }

        out
    }
}
