mod grammar;

pub use grammar::TreeSitterParser;

use std::path::Path;

use serde::Serialize;
use thiserror::Error;

/// Kind of named region extracted from a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Classes, structs, impls, traits, modules.
    Class,
    /// Functions and methods.
    Function,
}

/// A named region with 1-indexed inclusive line bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub name: String,
    pub start_line: usize,
    pub end_line: usize,
    pub children: Vec<Self>,
}

impl SyntaxNode {
    #[must_use]
    pub fn new(kind: NodeKind, name: impl Into<String>, start_line: usize, end_line: usize) -> Self {
        Self {
            kind,
            name: name.into(),
            start_line,
            end_line: end_line.max(start_line),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub const fn line_count(&self) -> usize {
        self.end_line - self.start_line + 1
    }
}

/// Tree of named regions for one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyntaxTree {
    pub nodes: Vec<SyntaxNode>,
}

impl SyntaxTree {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Why a file could not be turned into a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub message: String,
}

impl ParseError {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// Language-specific block extraction.
pub trait SourceParser: Send + Sync {
    fn language(&self) -> &'static str;

    /// Parse content into a tree of named regions.
    ///
    /// # Errors
    /// Returns a `ParseError` when the content is not structurally valid.
    fn parse(&self, content: &str) -> Result<SyntaxTree, ParseError>;
}

/// Map a file extension to a language name.
#[must_use]
pub fn language_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "rs" => Some("rust"),
        "go" => Some("go"),
        "py" | "pyi" => Some("python"),
        "js" | "jsx" | "mjs" | "cjs" => Some("javascript"),
        "ts" | "mts" | "cts" => Some("typescript"),
        "tsx" => Some("tsx"),
        _ => None,
    }
}

/// Get a parser for the given language.
#[must_use]
pub fn get_parser(language: &str) -> Option<Box<dyn SourceParser>> {
    match language.to_lowercase().as_str() {
        "rust" => Some(Box::new(TreeSitterParser::RUST)),
        "go" => Some(Box::new(TreeSitterParser::GO)),
        "python" => Some(Box::new(TreeSitterParser::PYTHON)),
        "typescript" => Some(Box::new(TreeSitterParser::TYPESCRIPT)),
        "javascript" | "jsx" => Some(Box::new(TreeSitterParser::JAVASCRIPT)),
        "tsx" => Some(Box::new(TreeSitterParser::TSX)),
        _ => None,
    }
}

/// Get a parser for a file based on its extension.
#[must_use]
pub fn parser_for_path(path: &Path) -> Option<Box<dyn SourceParser>> {
    language_for_path(path).and_then(get_parser)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
