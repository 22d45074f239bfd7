//! Finding the files a run should scan.

mod filter;

pub use filter::{FileFilter, GlobFilter, compile_globs};

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, RuleScanError};

/// Trait for turning a root path into the files beneath it.
pub trait FileDiscovery {
    /// All matching files under `root`, sorted. A file root yields itself.
    ///
    /// # Errors
    /// Returns an error if `root` does not exist.
    fn discover(&self, root: &Path) -> Result<Vec<PathBuf>>;
}

pub struct DirectoryWalker<F: FileFilter> {
    filter: F,
    use_gitignore: bool,
}

impl<F: FileFilter> DirectoryWalker<F> {
    #[must_use]
    pub const fn new(filter: F) -> Self {
        Self {
            filter,
            use_gitignore: false,
        }
    }

    #[must_use]
    pub const fn with_gitignore(filter: F, use_gitignore: bool) -> Self {
        Self {
            filter,
            use_gitignore,
        }
    }

    fn walk_plain(&self, root: &Path) -> Vec<PathBuf> {
        WalkDir::new(root)
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_file() && self.filter.should_include(e.path()))
            .map(walkdir::DirEntry::into_path)
            .collect()
    }

    fn walk_with_gitignore(&self, root: &Path) -> Vec<PathBuf> {
        use ignore::WalkBuilder;

        WalkBuilder::new(root)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .require_git(false)
            .hidden(false)
            .parents(false)
            .build()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_some_and(|ft| ft.is_file()))
            .filter(|e| self.filter.should_include(e.path()))
            .map(ignore::DirEntry::into_path)
            .collect()
    }
}

impl<F: FileFilter> FileDiscovery for DirectoryWalker<F> {
    fn discover(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !root.exists() {
            return Err(RuleScanError::Config(format!(
                "Path does not exist: {}",
                root.display()
            )));
        }
        if root.is_file() {
            return Ok(if self.filter.should_include(root) {
                vec![root.to_path_buf()]
            } else {
                Vec::new()
            });
        }

        let mut files = if self.use_gitignore {
            self.walk_with_gitignore(root)
        } else {
            self.walk_plain(root)
        };
        files.sort();
        tracing::debug!(root = %root.display(), files = files.len(), "discovered files");
        Ok(files)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
