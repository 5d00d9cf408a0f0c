//! Progress reporting capability passed into scans.
//!
//! The engine only ever calls `advance`. Calling `complete` is left to the
//! caller, once it has also written the resulting configuration.

use indicatif::{ProgressBar, ProgressStyle};

pub trait ProgressReporter: Sync {
    /// One more file processed.
    fn advance(&self);
    /// Work is finished.
    fn complete(&self);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn advance(&self) {}
    fn complete(&self) {}
}

/// Terminal progress bar used by the CLI.
pub struct BarReporter {
    bar: ProgressBar,
}

impl BarReporter {
    pub fn new(len: u64) -> Self {
        let bar = ProgressBar::new(len);
        if let Ok(style) = ProgressStyle::with_template("{spinner} scanning {pos}/{len} files {bar:30}") {
            bar.set_style(style);
        }
        BarReporter { bar }
    }

    /// A reporter that draws nothing (e.g. for JSON on stdout).
    pub fn hidden() -> Self {
        BarReporter {
            bar: ProgressBar::hidden(),
        }
    }
}

impl ProgressReporter for BarReporter {
    fn advance(&self) {
        self.bar.inc(1);
    }

    fn complete(&self) {
        self.bar.finish_and_clear();
    }
}
