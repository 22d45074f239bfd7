//! Parameter objects handed to scanner entry points.

mod collection;
mod cross_file;
mod naming;

pub use collection::FileCollection;
pub use cross_file::{ComparisonPairs, CrossFileScanContext, DEFAULT_MAX_COMPARISONS};
pub use naming::{TestFileClassifier, is_test_path};

use std::path::Path;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::resource::{Block, Scope, SourceFile};
use crate::rule::Rule;
use crate::violation::Violation;

/// Shared payload for every scan entry point.
///
/// `story_graph` is an opaque document forwarded to scanners untouched.
#[derive(Debug, Clone)]
pub struct ScanContext {
    pub story_graph: Value,
    pub classifier: TestFileClassifier,
}

impl Default for ScanContext {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ScanContext {
    /// Build a context; a missing or null payload becomes an empty object.
    #[must_use]
    pub fn new(story_graph: Option<Value>) -> Self {
        let story_graph = match story_graph {
            None | Some(Value::Null) => Value::Object(Map::new()),
            Some(value) => value,
        };
        Self {
            story_graph,
            classifier: TestFileClassifier::default(),
        }
    }

    #[must_use]
    pub fn with_classifier(mut self, classifier: TestFileClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    #[must_use]
    pub fn is_test_file(&self, path: &Path) -> bool {
        self.classifier.is_test_file(path)
    }
}

/// Context for scanning one file.
///
/// `file` is the scope's already loaded copy of `file_path`, when the scan
/// runs over a scope that holds it.
#[derive(Debug, Clone, Copy)]
pub struct FileScanContext<'a> {
    pub base: &'a ScanContext,
    pub rule: &'a Arc<Rule>,
    pub file_path: &'a Path,
    pub file: Option<&'a SourceFile>,
}

impl<'a> FileScanContext<'a> {
    #[must_use]
    pub const fn new(
        base: &'a ScanContext,
        rule: &'a Arc<Rule>,
        file_path: &'a Path,
    ) -> Self {
        Self {
            base,
            rule,
            file_path,
            file: None,
        }
    }

    #[must_use]
    pub const fn with_file(mut self, file: Option<&'a SourceFile>) -> Self {
        self.file = file;
        self
    }

    /// Whether the file is present, in the scope or on disk.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.file.is_some() || self.file_path.is_file()
    }

    /// Whether the path looks like a test file by naming convention.
    #[must_use]
    pub fn is_test_file(&self) -> bool {
        self.base.is_test_file(self.file_path)
    }

    #[must_use]
    pub const fn story_graph(&self) -> &'a Value {
        &self.base.story_graph
    }
}

/// Callback receiving each file's violations as soon as they are known.
pub type FileViolationCallback<'a> = &'a (dyn Fn(&Path, &[Violation]) + Sync);

/// Context for scanning a whole file collection.
#[derive(Clone, Copy)]
pub struct ScanFilesContext<'a> {
    pub base: &'a ScanContext,
    pub rule: &'a Arc<Rule>,
    pub files: &'a FileCollection,
    pub scope: Option<&'a Scope>,
    pub on_file_violations: Option<FileViolationCallback<'a>>,
}

impl<'a> ScanFilesContext<'a> {
    #[must_use]
    pub const fn new(
        base: &'a ScanContext,
        rule: &'a Arc<Rule>,
        files: &'a FileCollection,
    ) -> Self {
        Self {
            base,
            rule,
            files,
            scope: None,
            on_file_violations: None,
        }
    }

    /// Hand scanners the scope's loaded files instead of re-reading them.
    #[must_use]
    pub const fn with_scope(mut self, scope: &'a Scope) -> Self {
        self.scope = Some(scope);
        self
    }

    #[must_use]
    pub const fn with_callback(mut self, callback: FileViolationCallback<'a>) -> Self {
        self.on_file_violations = Some(callback);
        self
    }

    #[must_use]
    pub fn for_file(&self, file_path: &'a Path) -> FileScanContext<'a> {
        let file = self.scope.and_then(|scope| scope.file_by_path(file_path));
        FileScanContext::new(self.base, self.rule, file_path).with_file(file)
    }
}

impl std::fmt::Debug for ScanFilesContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanFilesContext")
            .field("rule", &self.rule.name)
            .field("files", &self.files)
            .field("has_scope", &self.scope.is_some())
            .field("has_callback", &self.on_file_violations.is_some())
            .finish_non_exhaustive()
    }
}

/// Context for checking one block of a parsed file.
#[derive(Debug, Clone, Copy)]
pub struct BlockScanContext<'a> {
    pub base: &'a ScanContext,
    pub rule: &'a Arc<Rule>,
    pub file: &'a SourceFile,
    pub block: &'a Block,
}

impl BlockScanContext<'_> {
    /// Start a violation of this context's rule located on the block.
    ///
    /// # Errors
    /// Returns `InvalidRule` if the rule lacks its identity fields.
    pub fn violation(&self, message: impl Into<String>) -> crate::Result<Violation> {
        Ok(Violation::new(self.rule, message)?.on_block(self.block))
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
