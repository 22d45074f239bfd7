use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use walkdir::WalkDir;

use crate::error::{Result, RuleScanError};
use crate::violation::Severity;

use super::Rule;

/// On-disk shape of one rule file.
#[derive(Debug, Deserialize)]
struct RuleFile {
    #[serde(default)]
    name: Option<String>,
    #[serde(default, alias = "scanner_path")]
    scanner: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    severity: Option<Severity>,
}

/// The set of rules loaded from a rules directory, sorted by `rule_file`.
#[derive(Debug, Clone, Default)]
pub struct RuleCatalog {
    root: PathBuf,
    rules: Vec<Arc<Rule>>,
}

impl RuleCatalog {
    #[must_use]
    pub fn from_rules(rules: Vec<Rule>) -> Self {
        let mut rules: Vec<Arc<Rule>> = rules.into_iter().map(Arc::new).collect();
        rules.sort_by(|a, b| a.rule_file.cmp(&b.rule_file));
        Self {
            root: PathBuf::new(),
            rules,
        }
    }

    /// Load every `*.json` rule file below `root`.
    ///
    /// A rule's `name` defaults to its file stem; `rule_file` is the path
    /// relative to `root` with forward slashes.
    ///
    /// # Errors
    /// Returns an error if `root` is missing or a rule file cannot be read or parsed.
    pub fn load(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(RuleScanError::Config(format!(
                "Rules directory not found: {}",
                root.display()
            )));
        }

        let mut rules = Vec::new();
        for entry in WalkDir::new(root)
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "json"))
        {
            rules.push(Self::load_rule_file(root, entry.path())?);
        }

        let mut catalog = Self::from_rules(rules);
        catalog.root = root.to_path_buf();
        tracing::debug!(root = %root.display(), count = catalog.len(), "loaded rule catalog");
        Ok(catalog)
    }

    fn load_rule_file(root: &Path, path: &Path) -> Result<Rule> {
        let content = std::fs::read_to_string(path).map_err(|source| RuleScanError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let file: RuleFile =
            serde_json::from_str(&content).map_err(|source| RuleScanError::JsonParse {
                path: path.to_path_buf(),
                source,
            })?;

        let rule_file = relative_rule_file(root, path);
        let name = file
            .name
            .filter(|n| !n.trim().is_empty())
            .or_else(|| {
                path.file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| rule_file.clone());

        let mut rule = Rule::new(name, rule_file)
            .with_description(file.description.unwrap_or_default())
            .with_severity(file.severity.unwrap_or_default());
        rule.scanner_path = file.scanner;
        Ok(rule)
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn rules(&self) -> &[Arc<Rule>] {
        &self.rules
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Look a rule up by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<Rule>> {
        self.rules.iter().find(|r| r.name == name)
    }
}

fn relative_rule_file(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
