//! Roll per-rule outcomes into a bounded health report.

mod aggregator;
mod thresholds;

pub use aggregator::{StatusAggregator, StatusReport, StatusSummary};
pub use thresholds::{OverallStatus, StatusThresholds};

use std::sync::Arc;

use serde::Serialize;

use crate::rule::Rule;
use crate::violation::{Severity, Violation};

/// How a rule's run ended. The four states are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleStatus {
    /// The scanner ran to completion.
    Executed,
    /// The scanner binding could not be resolved.
    LoadFailed,
    /// The scanner failed while running.
    ExecutionFailed,
    /// The rule declares no scanner.
    NoScanner,
}

impl RuleStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Executed => "EXECUTED",
            Self::LoadFailed => "LOAD_FAILED",
            Self::ExecutionFailed => "EXECUTION_FAILED",
            Self::NoScanner => "NO_SCANNER",
        }
    }
}

/// The result of running one rule.
#[derive(Debug, Clone, Serialize)]
pub struct RuleOutcome {
    pub rule_name: String,
    pub rule_file: String,
    pub status: RuleStatus,
    /// Load or execution error message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub violations: Vec<Violation>,
}

impl RuleOutcome {
    fn new(rule: &Rule, status: RuleStatus) -> Self {
        Self {
            rule_name: rule.name.clone(),
            rule_file: rule.rule_file.clone(),
            status,
            error: None,
            violations: Vec::new(),
        }
    }

    #[must_use]
    pub fn executed(rule: &Arc<Rule>, violations: Vec<Violation>) -> Self {
        Self {
            violations,
            ..Self::new(rule, RuleStatus::Executed)
        }
    }

    #[must_use]
    pub fn load_failed(rule: &Arc<Rule>, error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::new(rule, RuleStatus::LoadFailed)
        }
    }

    #[must_use]
    pub fn execution_failed(rule: &Arc<Rule>, error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::new(rule, RuleStatus::ExecutionFailed)
        }
    }

    #[must_use]
    pub fn no_scanner(rule: &Arc<Rule>) -> Self {
        Self::new(rule, RuleStatus::NoScanner)
    }

    #[must_use]
    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.violations.iter().any(|v| v.severity() == Severity::Error)
    }

    #[must_use]
    pub fn has_warnings(&self) -> bool {
        self.violations.iter().any(|v| v.severity() == Severity::Warning)
    }

    /// Executed with nothing to report.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.status == RuleStatus::Executed && self.violations.is_empty()
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
