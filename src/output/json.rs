use serde::Serialize;

use crate::error::Result;
use crate::status::{OverallStatus, RuleOutcome, StatusReport, StatusSummary};

use super::StatusFormatter;

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    status: OverallStatus,
    label: &'static str,
    summary: StatusSummary,
    rules: &'a [RuleOutcome],
}

impl StatusFormatter for JsonFormatter {
    fn format(&self, report: &StatusReport<'_>) -> Result<String> {
        let output = JsonOutput {
            status: report.status,
            label: report.status.label(),
            summary: report.summary,
            rules: report.outcomes,
        };
        Ok(serde_json::to_string_pretty(&output)?)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
