use std::fmt::Write;

use crate::cli::{Cli, RulesArgs};
use crate::registry::ScannerRegistry;
use crate::rule::{Rule, RuleCatalog};
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS};

use super::context::{build_registry, load_catalog, load_config, write_output};

/// How one rule's scanner binding resolves against the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleResolution {
    Resolved(String),
    NoScanner,
    LoadFailed(String),
}

impl RuleResolution {
    #[must_use]
    pub fn of(rule: &Rule, registry: &ScannerRegistry) -> Self {
        match registry.finds_scanner_by_rule(rule) {
            Ok(Some(scanner_type)) => Self::Resolved(scanner_type.qualified_path()),
            Ok(None) => Self::NoScanner,
            Err(e) => Self::LoadFailed(e.to_string()),
        }
    }
}

impl std::fmt::Display for RuleResolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Resolved(path) => write!(f, "{path}"),
            Self::NoScanner => f.write_str("NO SCANNER"),
            Self::LoadFailed(message) => write!(f, "LOAD FAILED: {message}"),
        }
    }
}

#[must_use]
pub fn run_rules(args: &RulesArgs, cli: &Cli) -> i32 {
    match run_rules_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

pub(crate) fn run_rules_impl(args: &RulesArgs, cli: &Cli) -> crate::Result<i32> {
    let mut config = load_config(args.config.as_deref(), cli.no_config)?;
    if let Some(rules) = &args.rules {
        config.rules.dir.clone_from(rules);
    }
    if let Some(bot) = &args.bot {
        config.rules.bot = Some(bot.clone());
    }

    let catalog = load_catalog(&config)?;
    let registry = build_registry(&config);
    write_output(None, &format_rules_listing(&catalog, &registry), cli.quiet)?;
    Ok(EXIT_SUCCESS)
}

/// One line per rule: `rule_file  [name]  binding -> resolution`.
#[must_use]
pub fn format_rules_listing(catalog: &RuleCatalog, registry: &ScannerRegistry) -> String {
    let mut output = String::new();
    if catalog.is_empty() {
        writeln!(output, "No rules found in {}", catalog.root().display()).ok();
        return output;
    }

    for rule in catalog.rules() {
        let binding = rule.scanner_binding().unwrap_or("-");
        let resolution = RuleResolution::of(rule, registry);
        writeln!(
            output,
            "{}  [{}]  {binding} -> {resolution}",
            rule.rule_file, rule.name
        )
        .ok();
    }
    writeln!(output).ok();
    let noun = if catalog.len() == 1 { "rule" } else { "rules" };
    writeln!(output, "{} {noun}", catalog.len()).ok();
    output
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod tests;
