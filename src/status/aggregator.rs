use std::cmp::Reverse;

use serde::Serialize;

use super::{OverallStatus, RuleOutcome, RuleStatus, StatusThresholds};

/// Aggregate counts over every rule outcome of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusSummary {
    pub total_rules: usize,
    pub executed: usize,
    pub load_failed: usize,
    pub execution_failed: usize,
    pub no_scanner: usize,
    pub total_violations: usize,
    /// Executed rules without violations.
    pub clean_rules: usize,
    /// Executed rules with warnings but no errors.
    pub warning_rules: usize,
    /// Executed rules with at least one error.
    pub error_rules: usize,
}

impl StatusSummary {
    #[must_use]
    pub fn from_outcomes(outcomes: &[RuleOutcome]) -> Self {
        let mut summary = Self {
            total_rules: outcomes.len(),
            ..Self::default()
        };
        for outcome in outcomes {
            match outcome.status {
                RuleStatus::Executed => {
                    summary.executed += 1;
                    summary.total_violations += outcome.violation_count();
                    if outcome.has_errors() {
                        summary.error_rules += 1;
                    } else if outcome.has_warnings() {
                        summary.warning_rules += 1;
                    } else {
                        summary.clean_rules += 1;
                    }
                }
                RuleStatus::LoadFailed => summary.load_failed += 1,
                RuleStatus::ExecutionFailed => summary.execution_failed += 1,
                RuleStatus::NoScanner => summary.no_scanner += 1,
            }
        }
        summary
    }
}

/// A classified run, with each section in display order.
#[derive(Debug, Clone)]
pub struct StatusReport<'a> {
    pub status: OverallStatus,
    pub summary: StatusSummary,
    /// Every outcome, in run order.
    pub outcomes: &'a [RuleOutcome],
    /// Rules with a scanner: errors, then warnings, then clean, then
    /// un-executed; each group by descending violation count, then rule file.
    pub rules: Vec<&'a RuleOutcome>,
    pub load_failures: Vec<&'a RuleOutcome>,
    pub execution_failures: Vec<&'a RuleOutcome>,
    /// The first `no_scanner_display_limit` rules without a scanner.
    pub no_scanner: Vec<&'a RuleOutcome>,
    /// No-scanner rules left out of `no_scanner`.
    pub no_scanner_hidden: usize,
}

/// Builds status reports under a fixed set of thresholds.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusAggregator {
    thresholds: StatusThresholds,
}

impl StatusAggregator {
    #[must_use]
    pub const fn new(thresholds: StatusThresholds) -> Self {
        Self { thresholds }
    }

    #[must_use]
    pub const fn thresholds(&self) -> &StatusThresholds {
        &self.thresholds
    }

    #[must_use]
    pub fn build<'a>(&self, outcomes: &'a [RuleOutcome]) -> StatusReport<'a> {
        let summary = StatusSummary::from_outcomes(outcomes);
        let status = self.thresholds.classify(&summary);

        let mut rules: Vec<&RuleOutcome> = outcomes
            .iter()
            .filter(|o| o.status != RuleStatus::NoScanner)
            .collect();
        rules.sort_by(|a, b| {
            (rank(a), Reverse(a.violation_count()), &a.rule_file).cmp(&(
                rank(b),
                Reverse(b.violation_count()),
                &b.rule_file,
            ))
        });

        let with_status = |status: RuleStatus| -> Vec<&'a RuleOutcome> {
            outcomes.iter().filter(|o| o.status == status).collect()
        };
        let mut no_scanner = with_status(RuleStatus::NoScanner);
        let no_scanner_hidden = no_scanner
            .len()
            .saturating_sub(self.thresholds.no_scanner_display_limit);
        no_scanner.truncate(self.thresholds.no_scanner_display_limit);

        StatusReport {
            status,
            summary,
            outcomes,
            rules,
            load_failures: with_status(RuleStatus::LoadFailed),
            execution_failures: with_status(RuleStatus::ExecutionFailed),
            no_scanner,
            no_scanner_hidden,
        }
    }
}

fn rank(outcome: &RuleOutcome) -> u8 {
    if outcome.status != RuleStatus::Executed {
        3
    } else if outcome.has_errors() {
        0
    } else if outcome.has_warnings() {
        1
    } else {
        2
    }
}

#[cfg(test)]
#[path = "aggregator_tests.rs"]
mod tests;
