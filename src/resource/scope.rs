use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use indexmap::IndexMap;

use super::{Block, BlockRef, FileId, SourceFile};

/// The bounded set of files a scan may examine.
///
/// Paths are kept in insertion order with duplicates removed. Files are
/// materialized once, on first access; paths that do not exist or are not
/// regular files are dropped at that point.
#[derive(Debug, Default)]
pub struct Scope {
    paths: Vec<PathBuf>,
    files: OnceLock<Vec<SourceFile>>,
    by_path: OnceLock<HashMap<PathBuf, FileId>>,
}

impl Scope {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut unique: IndexMap<PathBuf, PathBuf> = IndexMap::new();
        for path in paths {
            let path = path.into();
            let key = dunce::canonicalize(&path).unwrap_or_else(|_| path.clone());
            unique.entry(key).or_insert(path);
        }
        Self {
            paths: unique.into_values().collect(),
            files: OnceLock::new(),
            by_path: OnceLock::new(),
        }
    }

    /// A scope over in-memory sources, bypassing the filesystem.
    pub fn from_sources<I, P, C>(sources: I) -> Self
    where
        I: IntoIterator<Item = (P, C)>,
        P: Into<PathBuf>,
        C: Into<String>,
    {
        let mut paths = Vec::new();
        let mut files = Vec::new();
        for (path, content) in sources {
            let path = path.into();
            if paths.contains(&path) {
                continue;
            }
            files.push(SourceFile::from_content(
                FileId(files.len()),
                path.clone(),
                content,
            ));
            paths.push(path);
        }
        Self {
            paths,
            files: OnceLock::from(files),
            by_path: OnceLock::new(),
        }
    }

    /// The requested paths, before existence filtering.
    #[must_use]
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// The materialized files, computed once.
    #[must_use]
    pub fn files(&self) -> &[SourceFile] {
        self.files.get_or_init(|| {
            self.paths
                .iter()
                .filter(|path| {
                    let keep = path.is_file();
                    if !keep {
                        tracing::debug!(path = %path.display(), "excluded from scope: not a file");
                    }
                    keep
                })
                .enumerate()
                .map(|(i, path)| SourceFile::new(FileId(i), path.clone()))
                .collect()
        })
    }

    #[must_use]
    pub fn file(&self, id: FileId) -> Option<&SourceFile> {
        self.files().get(id.0)
    }

    #[must_use]
    pub fn file_by_path(&self, path: &Path) -> Option<&SourceFile> {
        let by_path = self.by_path.get_or_init(|| {
            self.files()
                .iter()
                .map(|f| (f.path().to_path_buf(), f.id()))
                .collect()
        });
        by_path.get(path).and_then(|&id| self.file(id))
    }

    /// Every block of every parsable file, file by file in pre-order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.files().iter().flat_map(SourceFile::blocks)
    }

    #[must_use]
    pub fn block(&self, block_ref: BlockRef) -> Option<&Block> {
        self.file(block_ref.file)
            .and_then(|file| file.block(block_ref.block))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files().is_empty()
    }
}

#[cfg(test)]
#[path = "scope_tests.rs"]
mod tests;
