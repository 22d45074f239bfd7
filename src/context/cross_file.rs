use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::rule::Rule;

use super::ScanContext;

/// Default ceiling on pairwise file comparisons.
pub const DEFAULT_MAX_COMPARISONS: usize = 10_000;

/// Context for checks that compare changed files against the full file set.
///
/// `max_comparisons` bounds the number of pairs a scanner should look at;
/// scanners are expected to honour it, typically via [`Self::comparison_pairs`].
#[derive(Debug, Clone, Copy)]
pub struct CrossFileScanContext<'a> {
    pub base: &'a ScanContext,
    pub rule: &'a Arc<Rule>,
    pub changed_files: &'a [PathBuf],
    pub all_files: &'a [PathBuf],
    pub max_comparisons: usize,
}

impl<'a> CrossFileScanContext<'a> {
    #[must_use]
    pub const fn new(
        base: &'a ScanContext,
        rule: &'a Arc<Rule>,
        changed_files: &'a [PathBuf],
        all_files: &'a [PathBuf],
    ) -> Self {
        Self {
            base,
            rule,
            changed_files,
            all_files,
            max_comparisons: DEFAULT_MAX_COMPARISONS,
        }
    }

    #[must_use]
    pub const fn with_max_comparisons(mut self, max_comparisons: usize) -> Self {
        self.max_comparisons = max_comparisons;
        self
    }

    /// `(changed, other)` pairs, skipping self-pairs, capped at `max_comparisons`.
    #[must_use]
    pub fn comparison_pairs(&self) -> ComparisonPairs<'a> {
        ComparisonPairs {
            changed: self.changed_files,
            all: self.all_files,
            changed_index: 0,
            all_index: 0,
            remaining: self.max_comparisons,
        }
    }
}

/// Iterator over bounded changed-vs-all file pairs.
#[derive(Debug, Clone)]
pub struct ComparisonPairs<'a> {
    changed: &'a [PathBuf],
    all: &'a [PathBuf],
    changed_index: usize,
    all_index: usize,
    remaining: usize,
}

impl<'a> ComparisonPairs<'a> {
    /// Whether the budget ran out before every pair was produced.
    #[must_use]
    pub fn exhausted_budget(&self) -> bool {
        self.remaining == 0 && self.peek_next().is_some()
    }

    fn peek_next(&self) -> Option<(usize, usize)> {
        let mut c = self.changed_index;
        let mut a = self.all_index;
        while c < self.changed.len() {
            while a < self.all.len() {
                if self.changed[c] != self.all[a] {
                    return Some((c, a));
                }
                a += 1;
            }
            c += 1;
            a = 0;
        }
        None
    }
}

impl<'a> Iterator for ComparisonPairs<'a> {
    type Item = (&'a Path, &'a Path);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let (c, a) = self.peek_next()?;
        self.changed_index = c;
        self.all_index = a + 1;
        self.remaining -= 1;
        Some((self.changed[c].as_path(), self.all[a].as_path()))
    }
}
