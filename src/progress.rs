//! Progress reporting infrastructure
//!
//! To avoid corrupted terminal output, you should not write anything to
//! stdout or stderr yourself as long as a report is being displayed. Please
//! use logs for debug messages.

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::borrow::Cow;

/// CLI progress report of ongoing operations
#[derive(Clone, Debug, Default)]
pub struct ProgressReport(MultiProgress);
//
impl ProgressReport {
    /// Prepare to report progress on the cli
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepare to report on an operation made of `steps` uniform steps
    pub fn add(&self, what: impl Into<Cow<'static, str>>, steps: usize) -> ProgressTracker {
        let bar = ProgressBar::new(steps as u64).with_prefix(what.into()).with_style(
            ProgressStyle::with_template("{prefix} {wide_bar} {pos}/{len}")
                .expect("the style above should be a valid indicatif style"),
        );
        if steps > 0 {
            self.0.add(bar.clone());
        }
        ProgressTracker {
            bar,
            report: self.0.clone(),
        }
    }
}

/// Mechanism to track progress of one operation
#[derive(Clone, Debug)]
pub struct ProgressTracker {
    /// Progress bar for this specific operation
    bar: ProgressBar,

    /// Underlying process report
    report: MultiProgress,
}
//
impl ProgressTracker {
    /// Show that a certain number of steps have been taken
    ///
    /// The progress bar hides itself once every expected step is done.
    pub fn make_progress(&self, steps: u64) {
        self.bar.inc(steps);
        let current = self.bar.position();
        let max = self.bar.length().unwrap_or(0);
        assert!(current <= max, "recorded more progress than expected");
        if current == max {
            self.bar.finish_and_clear();
            self.report.remove(&self.bar);
        }
    }
}
