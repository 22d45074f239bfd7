use std::io::IsTerminal;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use indicatif::{ProgressBar, ProgressStyle};

use crate::status::{RuleOutcome, RuleStatus};

/// Progress bar advanced once per finished rule.
///
/// Hidden in quiet mode or when stderr is not a TTY. The message shows the
/// last finished rule and, once any rule failed to load or run, a running
/// failure count.
#[derive(Clone)]
pub struct ScanProgress {
    progress_bar: ProgressBar,
    finished: Arc<AtomicU64>,
    failed: Arc<AtomicU64>,
}

impl ScanProgress {
    #[must_use]
    pub fn new(total: u64, quiet: bool) -> Self {
        let is_tty = std::io::stderr().is_terminal();
        Self::new_with_visibility(total, quiet, is_tty)
    }

    fn new_with_visibility(total: u64, quiet: bool, is_tty: bool) -> Self {
        let progress_bar = if quiet || !is_tty {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new(total);
            let style = ProgressStyle::default_bar()
                .template("{spinner:.green} Validating [{bar:40.cyan/blue}] {pos}/{len} rules {msg}")
                .map_or_else(|_| ProgressStyle::default_bar(), |s| s.progress_chars("█▓░"));
            pb.set_style(style);
            pb
        };

        Self {
            progress_bar,
            finished: Arc::new(AtomicU64::new(0)),
            failed: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Record one finished rule. Safe to call from rayon workers.
    pub fn record(&self, outcome: &RuleOutcome) {
        let finished = self.finished.fetch_add(1, Ordering::Relaxed) + 1;
        let failed = match outcome.status {
            RuleStatus::LoadFailed | RuleStatus::ExecutionFailed => {
                self.failed.fetch_add(1, Ordering::Relaxed) + 1
            }
            RuleStatus::Executed | RuleStatus::NoScanner => self.failed.load(Ordering::Relaxed),
        };

        self.progress_bar.set_position(finished);
        if failed == 0 {
            self.progress_bar.set_message(outcome.rule_name.clone());
        } else {
            self.progress_bar
                .set_message(format!("{} ({failed} failed)", outcome.rule_name));
        }
    }

    #[must_use]
    pub fn finished(&self) -> u64 {
        self.finished.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    pub fn finish(&self) {
        self.progress_bar.finish_and_clear();
    }
}

#[cfg(test)]
#[path = "progress_tests.rs"]
mod tests;
