use std::collections::BTreeSet;

use crate::context::FileScanContext;
use crate::error::Result;
use crate::parser::NodeKind;
use crate::resource::SourceFile;
use crate::scanner::support::{domain_terms, read_and_parse};
use crate::scanner::{Scanner, ScannerKind};
use crate::violation::{Severity, Violation};

/// Checks that test files declare tests and name them in domain terms.
///
/// A test file with no test function is a violation at the rule's severity.
/// When the story graph carries domain terms, each test whose name shares
/// none of them is reported as a warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct TestFileNamingScanner;

impl TestFileNamingScanner {
    fn is_test_function(file: &SourceFile, name: &str, start_line: usize) -> bool {
        if name.to_ascii_lowercase().starts_with("test") {
            return true;
        }
        // Rust tests are marked by attribute, not by name.
        start_line
            .checked_sub(1)
            .and_then(|prev| file.line(prev))
            .is_some_and(|line| line.content.trim() == "#[test]")
    }

    fn name_terms(name: &str) -> BTreeSet<String> {
        domain_terms(&serde_json::json!({ "name": name }))
    }

    fn check_file(ctx: &FileScanContext<'_>, file: &SourceFile) -> Result<Vec<Violation>> {
        if !file.parse_safely() {
            return Ok(Vec::new());
        }
        let location = ctx.file_path.display().to_string();

        let tests: Vec<_> = file
            .blocks()
            .iter()
            .filter(|b| b.kind() == NodeKind::Function)
            .filter(|b| Self::is_test_function(file, b.name(), b.start_line()))
            .collect();

        if tests.is_empty() {
            return Ok(vec![
                Violation::new(ctx.rule, "Test file defines no tests")?.at_location(location),
            ]);
        }

        let domain = domain_terms(ctx.story_graph());
        if domain.is_empty() {
            return Ok(Vec::new());
        }

        let mut violations = Vec::new();
        for test in tests {
            if Self::name_terms(test.name()).is_disjoint(&domain) {
                violations.push(
                    Violation::new(
                        ctx.rule,
                        format!("Test '{}' uses no domain term", test.name()),
                    )?
                    .with_severity(Severity::Warning)
                    .at_location(location.clone())
                    .at_line(test.start_line()),
                );
            }
        }
        Ok(violations)
    }
}

impl Scanner for TestFileNamingScanner {
    fn kind(&self) -> ScannerKind {
        ScannerKind::Test
    }

    fn scan_file_with_context(&self, ctx: &FileScanContext<'_>) -> Result<Vec<Violation>> {
        if let Some(file) = ctx.file {
            return Self::check_file(ctx, file);
        }
        if !ctx.exists() {
            return Ok(Vec::new());
        }
        read_and_parse(ctx.file_path)
            .map_or_else(|| Ok(Vec::new()), |file| Self::check_file(ctx, &file))
    }
}

#[cfg(test)]
#[path = "test_naming_tests.rs"]
mod tests;
