mod orchestrator;

pub use orchestrator::ScannerOrchestrator;

use std::sync::Arc;

use crate::context::ScanContext;
use crate::error::Result;
use crate::resource::Scope;
use crate::rule::Rule;
use crate::scanner::Scanner;
use crate::violation::{Severity, Violation};

/// One rule's execution against one scope.
///
/// Violations are kept in discovery order. Re-running a rule means building
/// a new `Scan`.
#[derive(Debug, Clone)]
pub struct Scan {
    rule: Arc<Rule>,
    context: ScanContext,
    violations: Vec<Violation>,
}

impl Scan {
    #[must_use]
    pub fn new(rule: Arc<Rule>) -> Self {
        Self {
            rule,
            context: ScanContext::default(),
            violations: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_context(mut self, context: ScanContext) -> Self {
        self.context = context;
        self
    }

    #[must_use]
    pub fn rule(&self) -> &Arc<Rule> {
        &self.rule
    }

    #[must_use]
    pub const fn context(&self) -> &ScanContext {
        &self.context
    }

    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    #[must_use]
    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }

    /// Run the scanner's block pass over `scope` and keep what it finds.
    ///
    /// # Errors
    /// Propagates the scanner's error; violations found so far are discarded.
    pub fn undergoes_scan(&mut self, scanner: &dyn Scanner, scope: &Scope) -> Result<()> {
        let rule = Arc::clone(&self.rule);
        let found = scanner.performs_scan_for_one_rule(self, scope, &rule)?;
        self.record(found);
        Ok(())
    }

    /// Append violations found by another entry point.
    pub fn record(&mut self, violations: impl IntoIterator<Item = Violation>) {
        self.violations.extend(violations);
    }

    fn count(&self, severity: Severity) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity() == severity)
            .count()
    }

    #[must_use]
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    /// Violations reported at `location`, in discovery order.
    pub fn violations_at<'a>(&'a self, location: &'a str) -> impl Iterator<Item = &'a Violation> {
        self.violations
            .iter()
            .filter(move |v| v.location() == location)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
