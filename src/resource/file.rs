use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use crate::parser::{SyntaxNode, SyntaxTree, parser_for_path};

use super::{Block, BlockId, FileId, Line};

#[derive(Debug)]
struct Loaded {
    content: String,
    readable: bool,
}

/// A file in a scope with lazily loaded content, tree and blocks.
///
/// Each lazy piece is computed at most once. Read and parse failures are
/// logged at debug level and degrade to empty content / no tree.
#[derive(Debug)]
pub struct SourceFile {
    id: FileId,
    path: Arc<Path>,
    loaded: OnceLock<Loaded>,
    tree: OnceLock<Option<SyntaxTree>>,
    blocks: OnceLock<Vec<Block>>,
}

impl SourceFile {
    /// A file whose content is read from disk on first use.
    #[must_use]
    pub fn new(id: FileId, path: impl Into<PathBuf>) -> Self {
        Self {
            id,
            path: Arc::from(path.into()),
            loaded: OnceLock::new(),
            tree: OnceLock::new(),
            blocks: OnceLock::new(),
        }
    }

    /// A file with content supplied up front.
    #[must_use]
    pub fn from_content(id: FileId, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            loaded: OnceLock::from(Loaded {
                content: content.into(),
                readable: true,
            }),
            ..Self::new(id, path)
        }
    }

    /// Read and parse a standalone file in one step.
    ///
    /// Returns `None` when the file cannot be read or parsed.
    #[must_use]
    pub fn read_and_parse(path: &Path) -> Option<Self> {
        let file = Self::new(FileId(0), path);
        file.parse_safely().then_some(file)
    }

    #[must_use]
    pub const fn id(&self) -> FileId {
        self.id
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn loaded(&self) -> &Loaded {
        self.loaded.get_or_init(|| match std::fs::read_to_string(&self.path) {
            Ok(content) => Loaded {
                content,
                readable: true,
            },
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "could not read file");
                Loaded {
                    content: String::new(),
                    readable: false,
                }
            }
        })
    }

    /// File content, or an empty string if it could not be read or decoded.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.loaded().content
    }

    /// Whether the content was read and decoded successfully.
    #[must_use]
    pub fn is_readable(&self) -> bool {
        self.loaded().readable
    }

    /// The parsed tree, or `None` if the file is unreadable, of an unknown
    /// language, or not structurally valid.
    #[must_use]
    pub fn tree(&self) -> Option<&SyntaxTree> {
        self.tree.get_or_init(|| self.parse()).as_ref()
    }

    /// Attempt to parse the file; `false` means it contributes no blocks.
    #[must_use]
    pub fn parse_safely(&self) -> bool {
        self.tree().is_some()
    }

    fn parse(&self) -> Option<SyntaxTree> {
        if !self.is_readable() {
            return None;
        }
        let Some(parser) = parser_for_path(&self.path) else {
            tracing::debug!(path = %self.path.display(), "no parser for file");
            return None;
        };
        match parser.parse(self.content()) {
            Ok(tree) => Some(tree),
            Err(e) => {
                tracing::debug!(
                    path = %self.path.display(),
                    line = e.line,
                    error = %e.message,
                    "parse failed"
                );
                None
            }
        }
    }

    /// All blocks of the file in pre-order; empty when the file does not parse.
    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        self.blocks.get_or_init(|| self.extract_blocks())
    }

    /// Top-level blocks only.
    pub fn root_blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks().iter().filter(|b| b.parent().is_none())
    }

    #[must_use]
    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks().get(id.0)
    }

    fn extract_blocks(&self) -> Vec<Block> {
        let Some(tree) = self.tree() else {
            return Vec::new();
        };
        let lines: Vec<&str> = self.content().lines().collect();
        let mut arena = Vec::new();
        for node in &tree.nodes {
            self.push_block(node, None, &lines, &mut arena);
        }
        arena
    }

    fn push_block(
        &self,
        node: &SyntaxNode,
        parent: Option<BlockId>,
        lines: &[&str],
        arena: &mut Vec<Block>,
    ) {
        let id = BlockId(arena.len());
        let start = node.start_line.saturating_sub(1).min(lines.len());
        let end = node.end_line.min(lines.len()).max(start);
        arena.push(Block::new(
            id,
            self.id,
            Arc::clone(&self.path),
            node.kind,
            node.name.clone(),
            (node.start_line, node.end_line),
            lines[start..end].join("\n"),
            parent,
        ));
        if let Some(parent) = parent {
            arena[parent.0].add_subblock(id);
        }
        for child in &node.children {
            self.push_block(child, Some(id), lines, arena);
        }
    }

    /// Lines of the file, computed from content on each call.
    pub fn lines(&self) -> impl Iterator<Item = Line<'_>> {
        let path: &Path = &self.path;
        self.content()
            .lines()
            .enumerate()
            .map(move |(i, content)| Line {
                path,
                number: i + 1,
                content,
            })
    }

    /// A single 1-indexed line.
    #[must_use]
    pub fn line(&self, number: usize) -> Option<Line<'_>> {
        number
            .checked_sub(1)
            .and_then(|i| self.content().lines().nth(i))
            .map(|content| Line {
                path: &self.path,
                number,
                content,
            })
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.content().lines().count()
    }
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
