use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use crate::parser::NodeKind;
use crate::violation::Violation;

use super::{BlockId, BlockRef, FileId, Line};

/// A named, contiguous line range of a file (a class, a function, ...).
///
/// Subblocks nest inside the parent's range. Both `add_subblock` and
/// `add_violation` only ever append.
#[derive(Debug)]
pub struct Block {
    id: BlockId,
    file: FileId,
    path: Arc<Path>,
    kind: NodeKind,
    name: String,
    start_line: usize,
    end_line: usize,
    content: String,
    parent: Option<BlockId>,
    subblocks: Vec<BlockId>,
    violations: Mutex<Vec<Violation>>,
}

impl Block {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: BlockId,
        file: FileId,
        path: Arc<Path>,
        kind: NodeKind,
        name: String,
        (start_line, end_line): (usize, usize),
        content: String,
        parent: Option<BlockId>,
    ) -> Self {
        Self {
            id,
            file,
            path,
            kind,
            name,
            start_line,
            end_line: end_line.max(start_line),
            content,
            parent,
            subblocks: Vec::new(),
            violations: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub const fn id(&self) -> BlockId {
        self.id
    }

    #[must_use]
    pub const fn file_id(&self) -> FileId {
        self.file
    }

    #[must_use]
    pub const fn block_ref(&self) -> BlockRef {
        BlockRef {
            file: self.file,
            block: self.id,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        self.kind
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn start_line(&self) -> usize {
        self.start_line
    }

    #[must_use]
    pub const fn end_line(&self) -> usize {
        self.end_line
    }

    #[must_use]
    pub const fn line_count(&self) -> usize {
        self.end_line - self.start_line + 1
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub const fn parent(&self) -> Option<BlockId> {
        self.parent
    }

    #[must_use]
    pub fn subblocks(&self) -> &[BlockId] {
        &self.subblocks
    }

    pub(crate) fn add_subblock(&mut self, child: BlockId) {
        self.subblocks.push(child);
    }

    /// Lines of this block, numbered as in the file.
    pub fn lines(&self) -> impl Iterator<Item = Line<'_>> {
        self.content
            .lines()
            .enumerate()
            .map(|(i, content)| Line {
                path: &self.path,
                number: self.start_line + i,
                content,
            })
    }

    /// Attach a violation discovered in this block.
    pub fn add_violation(&self, violation: Violation) {
        self.violations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(violation);
    }

    /// Snapshot of the violations attached so far, in discovery order.
    #[must_use]
    pub fn violations(&self) -> Vec<Violation> {
        self.violations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn violation_count(&self) -> usize {
        self.violations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
