use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::resource::{Block, BlockRef};
use crate::rule::Rule;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reported breach of a rule.
///
/// Violations are built with the consuming `with_*`/`on_block` methods and
/// never change after they are handed to a scan. When no explicit line is
/// given, [`Violation::line_number`] falls back to the start line of the block
/// the violation was raised on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    rule: Arc<Rule>,
    message: String,
    severity: Severity,
    location: String,
    line_number: Option<usize>,
    block: Option<BlockRef>,
    block_start_line: Option<usize>,
}

impl Violation {
    /// Start a violation of `rule` using the rule's default severity.
    ///
    /// # Errors
    /// Returns `InvalidRule` if the rule lacks a `name` or `rule_file`.
    pub fn new(rule: &Arc<Rule>, message: impl Into<String>) -> Result<Self> {
        rule.validate()?;
        Ok(Self {
            rule: Arc::clone(rule),
            message: message.into(),
            severity: rule.severity,
            location: String::new(),
            line_number: None,
            block: None,
            block_start_line: None,
        })
    }

    #[must_use]
    pub const fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    #[must_use]
    pub fn at_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    #[must_use]
    pub const fn at_line(mut self, line_number: usize) -> Self {
        self.line_number = Some(line_number);
        self
    }

    /// Tie the violation to a block. The location defaults to the block's file.
    #[must_use]
    pub fn on_block(mut self, block: &Block) -> Self {
        self.block = Some(block.block_ref());
        self.block_start_line = Some(block.start_line());
        if self.location.is_empty() {
            self.location = block.path().display().to_string();
        }
        self
    }

    #[must_use]
    pub fn rule(&self) -> &Arc<Rule> {
        &self.rule
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// The explicit line, else the owning block's start line.
    #[must_use]
    pub fn line_number(&self) -> Option<usize> {
        self.line_number.or(self.block_start_line)
    }

    #[must_use]
    pub const fn block(&self) -> Option<BlockRef> {
        self.block
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }

    #[must_use]
    pub fn to_record(&self) -> ViolationRecord {
        ViolationRecord::from(self)
    }
}

/// Serialized violation shape consumed by reporting layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationRecord {
    pub rule: String,
    pub rule_file: String,
    pub violation_message: String,
    pub severity: Severity,
    pub line_number: Option<usize>,
    pub location: String,
}

impl From<&Violation> for ViolationRecord {
    fn from(violation: &Violation) -> Self {
        Self {
            rule: violation.rule.name.clone(),
            rule_file: violation.rule.rule_file.clone(),
            violation_message: violation.message.clone(),
            severity: violation.severity,
            line_number: violation.line_number(),
            location: violation.location.clone(),
        }
    }
}

impl Serialize for Violation {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_record().serialize(serializer)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
