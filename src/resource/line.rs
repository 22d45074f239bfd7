use std::path::Path;

/// One line of a file. Derived from file content on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    pub path: &'a Path,
    /// 1-indexed line number.
    pub number: usize,
    pub content: &'a str,
}

impl Line<'_> {
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}
