//! Progress display for long scans.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::harvest::ProgressCallback;

/// Minimum number of files before the display is drawn. Short scans finish
/// before a bar is worth showing.
const MIN_FILES_FOR_PROGRESS: u64 = 10;

/// Spinner-style progress for the harvest pass. The total is unknown up
/// front (traversal and harvesting overlap), so this counts files as they
/// complete rather than estimating, and stays hidden until
/// [`MIN_FILES_FOR_PROGRESS`] files have been processed.
pub struct ScanProgress {
    bar: Option<ProgressBar>,
}

impl ScanProgress {
    /// Create a progress display. Shown only when enabled by config and the
    /// stream is an interactive terminal; both decisions belong to the
    /// caller.
    pub fn new(enabled: bool) -> Self {
        let bar = if enabled {
            let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::hidden());
            bar.set_style(
                ProgressStyle::with_template("{spinner} {pos} files scanned")
                    .expect("invalid progress template"),
            );
            Some(bar)
        } else {
            None
        };
        Self { bar }
    }

    /// Per-file callback handed to the harvester; `None` when disabled.
    /// The display switches from hidden to stderr on the tick that crosses
    /// the file threshold.
    pub fn callback(&self) -> Option<ProgressCallback> {
        self.bar.as_ref().map(|bar| {
            let bar = bar.clone();
            let drawn = Arc::new(AtomicBool::new(false));
            Arc::new(move || {
                bar.inc(1);
                if should_draw(bar.position()) && !drawn.swap(true, Ordering::Relaxed) {
                    bar.set_draw_target(ProgressDrawTarget::stderr());
                    bar.enable_steady_tick(Duration::from_millis(100));
                }
            }) as ProgressCallback
        })
    }

    /// Finish and clear the display.
    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

/// Whether enough files have completed to justify drawing the display.
fn should_draw(position: u64) -> bool {
    position >= MIN_FILES_FOR_PROGRESS
}
