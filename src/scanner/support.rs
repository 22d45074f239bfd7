//! Helpers shared by concrete scanners.

use std::collections::BTreeSet;
use std::path::Path;

use serde_json::Value;

use crate::resource::SourceFile;

/// Minimum length of a word kept as a domain term.
const MIN_TERM_LEN: usize = 3;

/// Read and parse a file, or `None` if either step fails.
#[must_use]
pub fn read_and_parse(path: &Path) -> Option<SourceFile> {
    SourceFile::read_and_parse(path)
}

/// Lines `start_line..=end_line` (1-indexed) plus `context` lines around them.
#[must_use]
pub fn extract_snippet(content: &str, start_line: usize, end_line: usize, context: usize) -> String {
    let lines: Vec<&str> = content.lines().collect();
    if lines.is_empty() || start_line == 0 {
        return String::new();
    }
    let first = start_line.saturating_sub(context + 1);
    let last = end_line.max(start_line).saturating_add(context).min(lines.len());
    if first >= last {
        return String::new();
    }
    lines[first..last].join("\n")
}

/// Lowercased words from every `name` string found in a story graph.
#[must_use]
pub fn domain_terms(story_graph: &Value) -> BTreeSet<String> {
    let mut terms = BTreeSet::new();
    collect_terms(story_graph, &mut terms);
    terms
}

fn collect_terms(value: &Value, terms: &mut BTreeSet<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                if key == "name"
                    && let Value::String(name) = child
                {
                    terms.extend(split_words(name));
                } else {
                    collect_terms(child, terms);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_terms(item, terms);
            }
        }
        _ => {}
    }
}

/// Split on non-alphanumerics and camel-case boundaries.
fn split_words(text: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for c in text.chars() {
        if !c.is_alphanumeric() {
            push_word(&mut words, &mut current);
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower {
            push_word(&mut words, &mut current);
        }
        prev_lower = c.is_lowercase() || c.is_numeric();
        current.extend(c.to_lowercase());
    }
    push_word(&mut words, &mut current);
    words
}

fn push_word(words: &mut Vec<String>, current: &mut String) {
    if current.chars().count() >= MIN_TERM_LEN {
        words.push(std::mem::take(current));
    } else {
        current.clear();
    }
}

#[cfg(test)]
#[path = "support_tests.rs"]
mod tests;
