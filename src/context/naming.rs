use std::path::Path;

use globset::GlobSet;

use crate::discovery::compile_globs;
use crate::error::Result;

/// Built-in test-file naming convention.
///
/// Matches `test_*`, `*_test`, `*_tests`, `*.test.*`, `*.spec.*` file names,
/// `conftest.py`, and anything under a `test` or `tests` directory.
#[must_use]
pub fn is_test_path(path: &Path) -> bool {
    let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let stem = file_name.split('.').next().unwrap_or(file_name);

    if stem.starts_with("test_")
        || stem.ends_with("_test")
        || stem.ends_with("_tests")
        || file_name == "conftest.py"
    {
        return true;
    }
    if file_name.contains(".test.") || file_name.contains(".spec.") {
        return true;
    }

    path.parent().is_some_and(|parent| {
        parent.components().any(|c| {
            let c = c.as_os_str();
            c == "tests" || c == "test"
        })
    })
}

/// Classifies paths as test files by convention plus configured globs.
#[derive(Debug, Clone, Default)]
pub struct TestFileClassifier {
    patterns: GlobSet,
}

impl TestFileClassifier {
    /// Create a classifier with extra glob patterns.
    ///
    /// # Errors
    /// Returns an error if any pattern is invalid.
    pub fn new(patterns: &[String]) -> Result<Self> {
        Ok(Self {
            patterns: compile_globs(patterns)?,
        })
    }

    #[must_use]
    pub fn is_test_file(&self, path: &Path) -> bool {
        is_test_path(path) || self.patterns.is_match(path)
    }
}
