//! Lazily materialized file/block tree over a fixed set of paths.
//!
//! A [`Scope`] owns its [`SourceFile`]s; each file owns an arena of
//! [`Block`]s addressed by [`BlockId`]. Blocks refer to their parent and
//! children by id, and a [`BlockRef`] addresses a block anywhere in a scope.

mod block;
mod file;
mod line;
mod scope;

pub use block::Block;
pub use file::SourceFile;
pub use line::Line;
pub use scope::Scope;

use serde::Serialize;

/// Index of a file within its scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FileId(pub usize);

/// Index of a block within its file's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BlockId(pub usize);

/// Scope-wide block address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BlockRef {
    pub file: FileId,
    pub block: BlockId,
}
