//! The pluggable scanner contract.
//!
//! Every entry point has a no-op default so a scanner implements only the
//! ones it needs: per-block checks via [`Scanner::scan_block`], per-file
//! checks via [`Scanner::scan_file_with_context`], or cross-file checks via
//! [`Scanner::scan_cross_file_with_context`].

pub mod support;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::context::{
    BlockScanContext, CrossFileScanContext, FileCollection, FileScanContext, ScanFilesContext,
};
use crate::error::Result;
use crate::resource::Scope;
use crate::rule::Rule;
use crate::scan::Scan;
use crate::violation::Violation;

/// Which side of the file collection a scanner looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScannerKind {
    /// Production code only.
    Code,
    /// Test files only.
    Test,
    #[default]
    Any,
}

impl ScannerKind {
    #[must_use]
    pub const fn accepts(self, is_test_file: bool) -> bool {
        match self {
            Self::Code => !is_test_file,
            Self::Test => is_test_file,
            Self::Any => true,
        }
    }

    /// The files of `collection` this kind scans, in collection order.
    pub fn files(self, collection: &FileCollection) -> Box<dyn Iterator<Item = &Path> + '_> {
        match self {
            Self::Code => Box::new(collection.code_files.iter().map(PathBuf::as_path)),
            Self::Test => Box::new(collection.test_files.iter().map(PathBuf::as_path)),
            Self::Any => Box::new(collection.all_files()),
        }
    }
}

/// One rule's check logic.
///
/// Errors returned from an entry point mean the scanner itself failed;
/// unreadable or unparsable files are not errors and simply yield no
/// violations.
pub trait Scanner: Send + Sync {
    fn kind(&self) -> ScannerKind {
        ScannerKind::Any
    }

    /// Scan every file of the collection this scanner's kind covers.
    ///
    /// The context's callback, if any, receives each file's violations
    /// right after that file is scanned.
    ///
    /// # Errors
    /// Propagates the first error returned by `scan_file_with_context`.
    fn scan_with_context(&self, ctx: &ScanFilesContext<'_>) -> Result<Vec<Violation>> {
        let mut violations = Vec::new();
        for path in self.kind().files(ctx.files) {
            let file_violations = self.scan_file_with_context(&ctx.for_file(path))?;
            if let Some(callback) = ctx.on_file_violations {
                callback(path, &file_violations);
            }
            violations.extend(file_violations);
        }
        Ok(violations)
    }

    /// Check a single file.
    ///
    /// # Errors
    /// Returns an error only when the scanner cannot continue.
    fn scan_file_with_context(&self, _ctx: &FileScanContext<'_>) -> Result<Vec<Violation>> {
        Ok(Vec::new())
    }

    /// Compare changed files against the full file set within `max_comparisons`.
    ///
    /// # Errors
    /// Returns an error only when the scanner cannot continue.
    fn scan_cross_file_with_context(
        &self,
        _ctx: &CrossFileScanContext<'_>,
    ) -> Result<Vec<Violation>> {
        Ok(Vec::new())
    }

    /// Run `scan_block` over every block of every parsable file in the scope.
    ///
    /// Each returned violation that names a block is also attached to that
    /// block, so violations can be walked per block as well as per scan.
    ///
    /// # Errors
    /// Propagates the first error returned by `scan_block`.
    fn performs_scan_for_one_rule(
        &self,
        scan: &Scan,
        scope: &Scope,
        rule: &Arc<Rule>,
    ) -> Result<Vec<Violation>> {
        let mut violations = Vec::new();
        for file in scope.files() {
            if !file.parse_safely() {
                continue;
            }
            if !self.kind().accepts(scan.context().is_test_file(file.path())) {
                continue;
            }
            for block in file.blocks() {
                let ctx = BlockScanContext {
                    base: scan.context(),
                    rule,
                    file,
                    block,
                };
                for violation in self.scan_block(&ctx)? {
                    if let Some(owner) = violation.block().and_then(|r| scope.block(r)) {
                        owner.add_violation(violation.clone());
                    }
                    violations.push(violation);
                }
            }
        }
        Ok(violations)
    }

    /// Check one block.
    ///
    /// # Errors
    /// Returns an error only when the scanner cannot continue.
    fn scan_block(&self, _ctx: &BlockScanContext<'_>) -> Result<Vec<Violation>> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
