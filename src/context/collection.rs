use std::path::{Path, PathBuf};

use serde::Serialize;

use super::TestFileClassifier;

/// Files under scan, split into test files and code files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileCollection {
    pub test_files: Vec<PathBuf>,
    pub code_files: Vec<PathBuf>,
}

impl FileCollection {
    #[must_use]
    pub const fn new(test_files: Vec<PathBuf>, code_files: Vec<PathBuf>) -> Self {
        Self {
            test_files,
            code_files,
        }
    }

    /// Split a file list using the classifier, preserving order within each side.
    #[must_use]
    pub fn partition(files: Vec<PathBuf>, classifier: &TestFileClassifier) -> Self {
        let (test_files, code_files) = files
            .into_iter()
            .partition(|path| classifier.is_test_file(path));
        Self {
            test_files,
            code_files,
        }
    }

    /// Test files first, then code files.
    pub fn all_files(&self) -> impl Iterator<Item = &Path> {
        self.test_files
            .iter()
            .chain(self.code_files.iter())
            .map(PathBuf::as_path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.test_files.len() + self.code_files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.test_files.is_empty() && self.code_files.is_empty()
    }
}
