mod catalog;

pub use catalog::RuleCatalog;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RuleScanError};
use crate::violation::Severity;

/// A declarative check, optionally bound to the scanner implementing it.
///
/// Rules are read-only to the engine. `rule_file` is the identity used when
/// reporting; `scanner_path` is a dotted reference such as
/// `scanners.long_block_scanner.LongBlockScanner`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub name: String,
    pub rule_file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scanner_path: Option<String>,
    #[serde(default)]
    pub description: String,
    /// Severity scanners should use for this rule's violations.
    #[serde(default)]
    pub severity: Severity,
}

impl Rule {
    #[must_use]
    pub fn new(name: impl Into<String>, rule_file: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rule_file: rule_file.into(),
            scanner_path: None,
            description: String::new(),
            severity: Severity::default(),
        }
    }

    #[must_use]
    pub fn with_scanner(mut self, scanner_path: impl Into<String>) -> Self {
        self.scanner_path = Some(scanner_path.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub const fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// The scanner binding, treating an empty or blank path as absent.
    #[must_use]
    pub fn scanner_binding(&self) -> Option<&str> {
        self.scanner_path
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }

    /// Check that the rule carries the identity fields violations depend on.
    ///
    /// # Errors
    /// Returns `InvalidRule` when `name` or `rule_file` is empty.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(RuleScanError::InvalidRule {
                field: "name",
                rule: self.rule_file.clone(),
            });
        }
        if self.rule_file.trim().is_empty() {
            return Err(RuleScanError::InvalidRule {
                field: "rule_file",
                rule: self.name.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
