use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::builtin::DEFAULT_MAX_BLOCK_LINES;
use crate::context::DEFAULT_MAX_COMPARISONS;
use crate::registry::DEFAULT_SHARED_NAMESPACE;
use crate::status::StatusThresholds;

/// Supported config version.
pub const CONFIG_VERSION: &str = "1";

/// File discovery settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScannerConfig {
    /// Respect .gitignore rules (default: true)
    #[serde(default = "default_true")]
    pub gitignore: bool,

    #[serde(default)]
    pub exclude: Vec<String>,

    /// Extensions to scan; empty means every file.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            gitignore: true,
            exclude: Vec::new(),
            extensions: default_extensions(),
        }
    }
}

/// Where rules live and how their scanners are resolved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RulesConfig {
    #[serde(default = "default_rules_dir")]
    pub dir: PathBuf,

    /// Enables the `bots.<bot>.scanners.*` fallback namespace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot: Option<String>,

    #[serde(default = "default_shared_namespace")]
    pub shared_namespace: String,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            dir: default_rules_dir(),
            bot: None,
            shared_namespace: default_shared_namespace(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CrossFileConfig {
    #[serde(default = "default_max_comparisons")]
    pub max_comparisons: usize,
}

impl Default for CrossFileConfig {
    fn default() -> Self {
        Self {
            max_comparisons: DEFAULT_MAX_COMPARISONS,
        }
    }
}

/// Extra globs classifying a path as a test file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestFilesConfig {
    #[serde(default)]
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuiltinConfig {
    #[serde(default = "default_max_block_lines")]
    pub max_block_lines: usize,
}

impl Default for BuiltinConfig {
    fn default() -> Self {
        Self {
            max_block_lines: DEFAULT_MAX_BLOCK_LINES,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default)]
    pub scanner: ScannerConfig,

    #[serde(default)]
    pub rules: RulesConfig,

    #[serde(default)]
    pub status: StatusThresholds,

    #[serde(default)]
    pub cross_file: CrossFileConfig,

    #[serde(default)]
    pub test_files: TestFilesConfig,

    #[serde(default)]
    pub builtin: BuiltinConfig,
}

const fn default_true() -> bool {
    true
}

fn default_extensions() -> Vec<String> {
    ["py", "rs", "go", "js", "jsx", "ts", "tsx", "c", "h", "cpp", "hpp"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_rules_dir() -> PathBuf {
    PathBuf::from("rules")
}

fn default_shared_namespace() -> String {
    DEFAULT_SHARED_NAMESPACE.to_string()
}

const fn default_max_comparisons() -> usize {
    DEFAULT_MAX_COMPARISONS
}

const fn default_max_block_lines() -> usize {
    DEFAULT_MAX_BLOCK_LINES
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
