#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the rulescan binary.
#[macro_export]
macro_rules! rulescan {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("rulescan"))
    };
}

/// Creates a temporary project directory for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a file with the given content in the temp directory.
    pub fn create_file(&self, relative_path: &str, content: &str) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    pub fn create_dir(&self, relative_path: &str) {
        let path = self.dir.path().join(relative_path);
        fs::create_dir_all(&path).expect("Failed to create directory");
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `.rulescan.toml` in the project root.
    pub fn create_config(&self, content: &str) {
        self.create_file(".rulescan.toml", content);
    }

    /// Writes `rules/<file>` with a JSON rule body.
    pub fn create_rule(&self, file: &str, body: &str) {
        self.create_file(&format!("rules/{file}"), body);
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Lowers the block limit so short fixtures trip `LongBlockScanner`.
pub const BASIC_CONFIG: &str = r#"version = "1"

[rules]
dir = "rules"

[builtin]
max_block_lines = 3
"#;

pub const LONG_BLOCK_RULE: &str =
    r#"{"scanner": "scanners.long_block_scanner.LongBlockScanner", "description": "Keep functions short"}"#;

pub const TEST_NAMING_RULE: &str =
    r#"{"scanner": "TestFileNamingScanner", "severity": "warning"}"#;

pub const DUPLICATE_RULE: &str =
    r#"{"scanner": "scanners.duplicate_file_scanner.DuplicateFileScanner"}"#;

pub const DOCS_RULE: &str = r#"{"description": "Reviewed by hand"}"#;

pub const LONG_FUNCTION_PY: &str = "\
def long_function():
    a = 1
    b = 2
    c = 3
    return a + b + c
";

pub const SHORT_FUNCTION_PY: &str = "\
def short_function():
    return 1
";
