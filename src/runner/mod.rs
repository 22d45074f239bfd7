//! Run a rule list over one shared scope and classify every rule's outcome.

mod target;

pub use target::ScanTarget;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::Arc;

use rayon::prelude::*;

use crate::context::{CrossFileScanContext, DEFAULT_MAX_COMPARISONS, ScanContext, ScanFilesContext};
use crate::error::Result;
use crate::registry::{ScannerRegistry, ScannerType};
use crate::rule::Rule;
use crate::scan::{Scan, ScannerOrchestrator};
use crate::status::RuleOutcome;
use crate::violation::Violation;

/// Called once per rule as soon as its outcome is known.
pub type ProgressCallback<'a> = &'a (dyn Fn(&RuleOutcome) + Sync);

/// Runs every entry point of each rule's scanner and absorbs failures
/// into [`RuleOutcome`]s, so one broken scanner never stops the run.
#[derive(Debug)]
pub struct ValidationRunner<'r> {
    registry: &'r ScannerRegistry,
    context: ScanContext,
    jobs: usize,
    max_comparisons: usize,
}

impl<'r> ValidationRunner<'r> {
    #[must_use]
    pub fn new(registry: &'r ScannerRegistry) -> Self {
        Self {
            registry,
            context: ScanContext::default(),
            jobs: 1,
            max_comparisons: DEFAULT_MAX_COMPARISONS,
        }
    }

    #[must_use]
    pub fn with_context(mut self, context: ScanContext) -> Self {
        self.context = context;
        self
    }

    /// Number of rules run at once; `0` and `1` both mean sequential.
    #[must_use]
    pub const fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    #[must_use]
    pub const fn with_max_comparisons(mut self, max_comparisons: usize) -> Self {
        self.max_comparisons = max_comparisons;
        self
    }

    /// Run every rule against `target`. Outcomes keep the order of `rules`.
    pub fn run(
        &self,
        rules: &[Arc<Rule>],
        target: &ScanTarget,
        progress: Option<ProgressCallback<'_>>,
    ) -> Vec<RuleOutcome> {
        let run_one = |rule: &Arc<Rule>| {
            let outcome = self.run_rule(rule, target);
            if let Some(progress) = progress {
                progress(&outcome);
            }
            outcome
        };

        if self.jobs <= 1 {
            return rules.iter().map(run_one).collect();
        }
        match rayon::ThreadPoolBuilder::new().num_threads(self.jobs).build() {
            Ok(pool) => pool.install(|| rules.par_iter().map(run_one).collect()),
            Err(e) => {
                tracing::warn!(error = %e, "could not start worker pool, running sequentially");
                rules.iter().map(run_one).collect()
            }
        }
    }

    /// Resolve and run one rule's scanner.
    #[must_use]
    pub fn run_rule(&self, rule: &Arc<Rule>, target: &ScanTarget) -> RuleOutcome {
        let scanner_type = match self.registry.finds_scanner_by_rule(rule) {
            Ok(Some(scanner_type)) => scanner_type,
            Ok(None) => {
                tracing::info!(rule = %rule.name, "no scanner configured");
                return RuleOutcome::no_scanner(rule);
            }
            Err(e) => {
                tracing::warn!(rule = %rule.name, error = %e, "scanner failed to load");
                return RuleOutcome::load_failed(rule, e.to_string());
            }
        };

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            self.execute(&scanner_type, rule, target)
        }));
        match result {
            Ok(Ok(violations)) => {
                tracing::info!(
                    rule = %rule.name,
                    violations = violations.len(),
                    "rule executed"
                );
                RuleOutcome::executed(rule, violations)
            }
            Ok(Err(e)) => {
                tracing::warn!(rule = %rule.name, error = %e, "scanner failed");
                RuleOutcome::execution_failed(rule, e.to_string())
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                tracing::warn!(rule = %rule.name, error = %message, "scanner panicked");
                RuleOutcome::execution_failed(rule, format!("scanner panicked: {message}"))
            }
        }
    }

    /// Block pass, then per-file pass, then cross-file pass when files changed.
    fn execute(
        &self,
        scanner_type: &ScannerType,
        rule: &Arc<Rule>,
        target: &ScanTarget,
    ) -> Result<Vec<Violation>> {
        let scanner = scanner_type.instantiate();
        let scan = Scan::new(Arc::clone(rule)).with_context(self.context.clone());
        let mut scan = ScannerOrchestrator::new(self.registry).performs_scan_on_scope(
            scan,
            target.scope(),
            Some(scanner.as_ref()),
        )?;

        let log_file = |path: &Path, violations: &[Violation]| {
            if !violations.is_empty() {
                tracing::debug!(
                    rule = %rule.name,
                    path = %path.display(),
                    violations = violations.len(),
                    "file scanned"
                );
            }
        };
        let per_file = scanner.scan_with_context(
            &ScanFilesContext::new(scan.context(), rule, target.files())
                .with_scope(target.scope())
                .with_callback(&log_file),
        )?;
        scan.record(per_file);

        if !target.changed_files().is_empty() {
            let cross_file = scanner.scan_cross_file_with_context(
                &CrossFileScanContext::new(
                    scan.context(),
                    rule,
                    target.changed_files(),
                    target.all_files(),
                )
                .with_max_comparisons(self.max_comparisons),
            )?;
            scan.record(cross_file);
        }

        Ok(scan.into_violations())
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
