use std::path::{Component, Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::error::{Result, RuleScanError};

pub trait FileFilter {
    fn should_include(&self, path: &Path) -> bool;
}

/// Compile `patterns` into one set, naming the offending pattern on failure.
///
/// # Errors
/// Returns `InvalidPattern` for the first pattern globset rejects.
pub fn compile_globs(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|source| RuleScanError::InvalidPattern {
            pattern: pattern.clone(),
            source,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| RuleScanError::InvalidPattern {
        pattern: patterns.join(", "),
        source,
    })
}

/// Keeps files with a listed extension that match no exclude pattern.
///
/// Extensions compare case-insensitively and may be written with or
/// without the leading dot. Excludes are matched against the path with
/// any `./` prefix removed, so `./build/x.py` and `build/x.py` agree.
pub struct GlobFilter {
    extensions: Vec<String>,
    excludes: GlobSet,
}

impl GlobFilter {
    /// Create a filter; an empty extension list accepts every extension.
    ///
    /// # Errors
    /// Returns an error if any exclude pattern is invalid.
    pub fn new(extensions: Vec<String>, exclude_patterns: &[String]) -> Result<Self> {
        let extensions = extensions
            .into_iter()
            .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();
        Ok(Self {
            extensions,
            excludes: compile_globs(exclude_patterns)?,
        })
    }

    fn has_listed_extension(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }

    fn is_excluded(&self, path: &Path) -> bool {
        let relative: PathBuf = path
            .components()
            .skip_while(|c| matches!(c, Component::CurDir))
            .collect();
        self.excludes.is_match(&relative)
    }
}

impl FileFilter for GlobFilter {
    fn should_include(&self, path: &Path) -> bool {
        self.has_listed_extension(path) && !self.is_excluded(path)
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
