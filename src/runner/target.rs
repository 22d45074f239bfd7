use std::path::PathBuf;

use crate::context::{FileCollection, TestFileClassifier};
use crate::resource::Scope;

/// Everything a run scans: the scope, its test/code split, and the
/// changed-file subset used by cross-file checks.
#[derive(Debug, Default)]
pub struct ScanTarget {
    scope: Scope,
    files: FileCollection,
    all_files: Vec<PathBuf>,
    changed_files: Vec<PathBuf>,
}

impl ScanTarget {
    #[must_use]
    pub fn new(files: FileCollection) -> Self {
        let all_files: Vec<PathBuf> = files.all_files().map(PathBuf::from).collect();
        Self {
            scope: Scope::new(all_files.iter().cloned()),
            files,
            all_files,
            changed_files: Vec::new(),
        }
    }

    /// Classify `paths` into test and code files and build the target.
    #[must_use]
    pub fn from_paths(paths: Vec<PathBuf>, classifier: &TestFileClassifier) -> Self {
        Self::new(FileCollection::partition(paths, classifier))
    }

    /// A target over in-memory sources, for tests and embedding.
    pub fn from_sources<I, P, C>(sources: I, classifier: &TestFileClassifier) -> Self
    where
        I: IntoIterator<Item = (P, C)>,
        P: Into<PathBuf>,
        C: Into<String>,
    {
        let scope = Scope::from_sources(sources);
        let files = FileCollection::partition(scope.paths().to_vec(), classifier);
        Self {
            all_files: files.all_files().map(PathBuf::from).collect(),
            scope,
            files,
            changed_files: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_changed_files(mut self, changed_files: Vec<PathBuf>) -> Self {
        self.changed_files = changed_files;
        self
    }

    #[must_use]
    pub const fn scope(&self) -> &Scope {
        &self.scope
    }

    #[must_use]
    pub const fn files(&self) -> &FileCollection {
        &self.files
    }

    #[must_use]
    pub fn all_files(&self) -> &[PathBuf] {
        &self.all_files
    }

    #[must_use]
    pub fn changed_files(&self) -> &[PathBuf] {
        &self.changed_files
    }
}
