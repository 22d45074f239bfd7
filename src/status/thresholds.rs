use serde::{Deserialize, Serialize};

use super::StatusSummary;

/// Tunable limits of the status classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusThresholds {
    /// Below this many violations, with no error rules, the run is healthy.
    pub healthy_violation_ceiling: usize,
    /// Below this many violations the run can still be good.
    pub good_violation_ceiling: usize,
    /// Most error-carrying rules a good run may have.
    pub good_error_rule_ceiling: usize,
    /// More load failures than this is critical.
    pub critical_load_failures: usize,
    /// Entries shown in the no-scanner section.
    pub no_scanner_display_limit: usize,
}

impl Default for StatusThresholds {
    fn default() -> Self {
        Self {
            healthy_violation_ceiling: 150,
            good_violation_ceiling: 200,
            good_error_rule_ceiling: 5,
            critical_load_failures: 2,
            no_scanner_display_limit: 10,
        }
    }
}

impl StatusThresholds {
    /// Pick the single overall status for a run. The first matching step wins.
    #[must_use]
    pub const fn classify(&self, summary: &StatusSummary) -> OverallStatus {
        if summary.execution_failed > 0 || summary.load_failed > self.critical_load_failures {
            OverallStatus::Critical
        } else if summary.total_violations == 0 {
            OverallStatus::AllClean
        } else if summary.total_violations < self.healthy_violation_ceiling
            && summary.error_rules == 0
        {
            OverallStatus::Healthy
        } else if summary.total_violations < self.good_violation_ceiling
            && summary.error_rules <= self.good_error_rule_ceiling
        {
            OverallStatus::Good
        } else if summary.error_rules > 0 {
            OverallStatus::NeedsAttention
        } else {
            OverallStatus::WarningsFound
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverallStatus {
    Critical,
    AllClean,
    Healthy,
    Good,
    NeedsAttention,
    WarningsFound,
}

impl OverallStatus {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL ISSUES",
            Self::AllClean => "ALL CLEAN",
            Self::Healthy => "HEALTHY",
            Self::Good => "GOOD (minor issues)",
            Self::NeedsAttention => "NEEDS ATTENTION",
            Self::WarningsFound => "WARNINGS FOUND",
        }
    }

    /// Whether the run should fail a CI gate.
    #[must_use]
    pub const fn is_failure(self) -> bool {
        matches!(self, Self::Critical | Self::NeedsAttention)
    }
}

impl std::fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
#[path = "thresholds_tests.rs"]
mod tests;
