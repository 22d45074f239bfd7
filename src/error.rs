use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RuleScanError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid glob pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("Invalid rule file {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A violation was built against something that is not a usable rule.
    #[error("Invalid rule: missing `{field}` (rule: {rule:?})")]
    InvalidRule { field: &'static str, rule: String },

    #[error("{message}")]
    ScannerLoad { path: String, message: String },

    #[error("Scanner {scanner} failed: {message}")]
    ScannerExecution { scanner: String, message: String },

    #[error("Parse error in {path} at line {line}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },
}

impl RuleScanError {
    /// Build the load error reported when no candidate location exposes the scanner.
    #[must_use]
    pub fn scanner_not_found(path: &str) -> Self {
        Self::ScannerLoad {
            path: path.to_string(),
            message: format!("Scanner class not found: {path}"),
        }
    }

    /// Build an execution error for a scanner that gave up mid-run.
    pub fn execution(scanner: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ScannerExecution {
            scanner: scanner.into(),
            message: message.into(),
        }
    }

    /// Short category tag used in machine-readable output.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Config(_) | Self::TomlParse(_) => "Config",
            Self::FileRead { .. } => "FileRead",
            Self::InvalidPattern { .. } => "Pattern",
            Self::Io(_) => "IO",
            Self::JsonSerialize(_) | Self::JsonParse { .. } => "JSON",
            Self::InvalidRule { .. } => "Rule",
            Self::ScannerLoad { .. } => "ScannerLoad",
            Self::ScannerExecution { .. } => "ScannerExecution",
            Self::Parse { .. } => "Parse",
        }
    }
}

pub type Result<T> = std::result::Result<T, RuleScanError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
