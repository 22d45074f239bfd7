use std::collections::HashMap;
use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::context::CrossFileScanContext;
use crate::error::Result;
use crate::scanner::Scanner;
use crate::violation::Violation;

/// Flags changed files whose content duplicates another file.
///
/// Content is compared after trimming trailing whitespace and dropping
/// blank lines. Only the first `max_comparisons` pairs are examined.
#[derive(Debug, Clone, Copy, Default)]
pub struct DuplicateFileScanner;

/// SHA-256 of `content` with blank lines and trailing whitespace removed,
/// or `None` when nothing remains.
#[must_use]
pub fn normalized_digest(content: &str) -> Option<[u8; 32]> {
    let mut hasher = Sha256::new();
    let mut empty = true;
    for line in content.lines().map(str::trim_end).filter(|l| !l.is_empty()) {
        hasher.update(line.as_bytes());
        hasher.update(b"\n");
        empty = false;
    }
    (!empty).then(|| hasher.finalize().into())
}

fn cached_digest<'a>(
    digests: &mut HashMap<&'a Path, Option<[u8; 32]>>,
    path: &'a Path,
) -> Option<[u8; 32]> {
    *digests.entry(path).or_insert_with(|| {
        fs::read_to_string(path)
            .map_err(|e| tracing::debug!(path = %path.display(), error = %e, "skipping unreadable file"))
            .ok()
            .and_then(|content| normalized_digest(&content))
    })
}

impl Scanner for DuplicateFileScanner {
    fn scan_cross_file_with_context(
        &self,
        ctx: &CrossFileScanContext<'_>,
    ) -> Result<Vec<Violation>> {
        let mut digests: HashMap<&Path, Option<[u8; 32]>> = HashMap::new();

        let mut pairs = ctx.comparison_pairs();
        let mut violations = Vec::new();
        for (changed, other) in pairs.by_ref() {
            let Some(left) = cached_digest(&mut digests, changed) else {
                continue;
            };
            if cached_digest(&mut digests, other) == Some(left) {
                violations.push(
                    Violation::new(
                        ctx.rule,
                        format!("Duplicates the content of {}", other.display()),
                    )?
                    .at_location(changed.display().to_string()),
                );
            }
        }
        if pairs.exhausted_budget() {
            tracing::debug!(
                rule = %ctx.rule.name,
                max_comparisons = ctx.max_comparisons,
                "comparison budget exhausted"
            );
        }
        Ok(violations)
    }
}

#[cfg(test)]
#[path = "duplicate_file_tests.rs"]
mod tests;
