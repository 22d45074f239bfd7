use std::io::Write;

use crate::error::Result;
use crate::status::{OverallStatus, RuleOutcome, RuleStatus, StatusReport, StatusSummary};
use crate::violation::Severity;

use super::StatusFormatter;

/// Color output mode for terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Auto-detect: use colors if stdout is a TTY and `NO_COLOR` is not set
    #[default]
    Auto,
    Always,
    Never,
}

mod ansi {
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const RESET: &str = "\x1b[0m";
}

/// Line-oriented status report.
///
/// Sections appear in a fixed order and are left out when empty: overall
/// status, summary table, rules, load failures, execution failures, rules
/// without a scanner. With `verbose >= 1` each rule also lists its violations.
pub struct TextFormatter {
    use_colors: bool,
    verbose: u8,
}

impl TextFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self::with_verbose(mode, 0)
    }

    #[must_use]
    pub fn with_verbose(mode: ColorMode, verbose: u8) -> Self {
        Self {
            use_colors: Self::should_use_colors(mode),
            verbose,
        }
    }

    fn should_use_colors(mode: ColorMode) -> bool {
        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                std::io::IsTerminal::is_terminal(&std::io::stdout())
            }
        }
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        format!("{color}{text}{}", ansi::RESET)
    }

    const fn status_color(status: OverallStatus) -> &'static str {
        match status {
            OverallStatus::Critical | OverallStatus::NeedsAttention => ansi::RED,
            OverallStatus::AllClean | OverallStatus::Healthy => ansi::GREEN,
            OverallStatus::Good | OverallStatus::WarningsFound => ansi::YELLOW,
        }
    }

    fn rule_marker(&self, outcome: &RuleOutcome) -> String {
        match outcome.status {
            RuleStatus::Executed if outcome.has_errors() => self.colorize("✗", ansi::RED),
            RuleStatus::Executed if outcome.has_warnings() => self.colorize("⚠", ansi::YELLOW),
            RuleStatus::Executed => self.colorize("✓", ansi::GREEN),
            _ => self.colorize("◉", ansi::CYAN),
        }
    }

    fn format_summary(summary: &StatusSummary, output: &mut Vec<u8>) {
        let rows = [
            ("Rules", summary.total_rules),
            ("Executed", summary.executed),
            ("Load failures", summary.load_failed),
            ("Execution failures", summary.execution_failed),
            ("No scanner", summary.no_scanner),
            ("Total violations", summary.total_violations),
            ("Clean rules", summary.clean_rules),
            ("Rules with warnings", summary.warning_rules),
            ("Rules with errors", summary.error_rules),
        ];
        writeln!(output, "Summary").ok();
        for (label, value) in rows {
            writeln!(output, "  {label:<20} {value:>6}").ok();
        }
    }

    fn format_rule(&self, outcome: &RuleOutcome, output: &mut Vec<u8>) {
        let marker = self.rule_marker(outcome);
        let detail = match outcome.status {
            RuleStatus::Executed => describe_counts(outcome),
            status => status.as_str().to_string(),
        };
        writeln!(output, "  {marker} {}: {detail}", outcome.rule_file).ok();

        if self.verbose >= 1 {
            for violation in &outcome.violations {
                let line = violation
                    .line_number()
                    .map_or_else(String::new, |n| format!(":{n}"));
                writeln!(
                    output,
                    "      [{}] {}{line} {}",
                    violation.severity(),
                    violation.location(),
                    violation.message()
                )
                .ok();
            }
        }
    }

    fn format_failures(title: &str, outcomes: &[&RuleOutcome], output: &mut Vec<u8>) {
        if outcomes.is_empty() {
            return;
        }
        writeln!(output).ok();
        writeln!(output, "{title}").ok();
        for outcome in outcomes {
            let error = outcome.error.as_deref().unwrap_or("unknown error");
            writeln!(output, "  - {}: {error}", outcome.rule_file).ok();
        }
    }
}

fn describe_counts(outcome: &RuleOutcome) -> String {
    let total = outcome.violation_count();
    if total == 0 {
        return "clean".to_string();
    }
    let errors = outcome
        .violations
        .iter()
        .filter(|v| v.severity() == Severity::Error)
        .count();
    let warnings = total - errors;
    format!(
        "{total} {} ({errors} {}, {warnings} {})",
        plural(total, "violation"),
        plural(errors, "error"),
        plural(warnings, "warning"),
    )
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new(ColorMode::Auto)
    }
}

impl StatusFormatter for TextFormatter {
    fn format(&self, report: &StatusReport<'_>) -> Result<String> {
        let mut output = Vec::new();

        let label = self.colorize(report.status.label(), Self::status_color(report.status));
        writeln!(output, "Overall status: {label}").ok();
        writeln!(output).ok();

        Self::format_summary(&report.summary, &mut output);

        if !report.rules.is_empty() {
            writeln!(output).ok();
            writeln!(output, "Rules").ok();
            for outcome in &report.rules {
                self.format_rule(outcome, &mut output);
            }
        }

        Self::format_failures("Load failures", &report.load_failures, &mut output);
        Self::format_failures("Execution failures", &report.execution_failures, &mut output);

        if !report.no_scanner.is_empty() {
            writeln!(output).ok();
            writeln!(output, "No scanner configured").ok();
            for outcome in &report.no_scanner {
                writeln!(output, "  - {}", outcome.rule_file).ok();
            }
            if report.no_scanner_hidden > 0 {
                writeln!(
                    output,
                    "  ... and {} more rules without scanners",
                    report.no_scanner_hidden
                )
                .ok();
            }
        }

        Ok(String::from_utf8_lossy(&output).to_string())
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
