use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use super::*;
use crate::context::ScanContext;
use crate::rule::Rule;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn scan(changed: &[PathBuf], all: &[PathBuf], max_comparisons: usize) -> Vec<Violation> {
    let rule = Arc::new(Rule::new("no-duplicates", "code/no_duplicates.json"));
    let base = ScanContext::default();
    let ctx = CrossFileScanContext::new(&base, &rule, changed, all)
        .with_max_comparisons(max_comparisons);
    DuplicateFileScanner.scan_cross_file_with_context(&ctx).unwrap()
}

#[test]
fn digest_ignores_blank_lines_and_trailing_whitespace() {
    assert_eq!(
        normalized_digest("a = 1  \n\n\nb = 2\n"),
        normalized_digest("a = 1\nb = 2")
    );
    assert_ne!(normalized_digest("a = 1"), normalized_digest("a = 2"));
    assert_eq!(normalized_digest(" \n\n"), None);
}

#[test]
fn flags_changed_file_duplicating_another() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.py", "def f():\n    return 1\n");
    let b = write(&dir, "b.py", "def f():\n    return 1\n\n");
    let c = write(&dir, "c.py", "def g():\n    return 2\n");

    let violations = scan(&[a.clone()], &[a.clone(), b.clone(), c], 100);

    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].location(), a.display().to_string());
    assert_eq!(
        violations[0].message(),
        format!("Duplicates the content of {}", b.display())
    );
}

#[test]
fn respects_comparison_budget() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.py", "x = 1\n");
    let b = write(&dir, "b.py", "y = 2\n");
    let c = write(&dir, "c.py", "x = 1\n");
    let all = [a.clone(), b, c];

    assert!(scan(&[a.clone()], &all, 1).is_empty());
    assert_eq!(scan(&[a], &all, 2).len(), 1);
}

#[test]
fn empty_and_missing_files_are_not_duplicates() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.py", "\n");
    let b = write(&dir, "b.py", "\n");
    let missing = dir.path().join("gone.py");

    assert!(scan(&[a.clone()], &[a, b, missing], 100).is_empty());
}
