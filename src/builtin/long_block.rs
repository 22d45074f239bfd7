use crate::context::BlockScanContext;
use crate::error::Result;
use crate::parser::NodeKind;
use crate::scanner::Scanner;
use crate::violation::Violation;

pub const DEFAULT_MAX_BLOCK_LINES: usize = 50;

/// Flags functions longer than a line limit.
#[derive(Debug, Clone, Copy)]
pub struct LongBlockScanner {
    max_lines: usize,
}

impl Default for LongBlockScanner {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_BLOCK_LINES)
    }
}

impl LongBlockScanner {
    #[must_use]
    pub const fn new(max_lines: usize) -> Self {
        Self { max_lines }
    }

    #[must_use]
    pub const fn max_lines(&self) -> usize {
        self.max_lines
    }
}

impl Scanner for LongBlockScanner {
    fn scan_block(&self, ctx: &BlockScanContext<'_>) -> Result<Vec<Violation>> {
        let block = ctx.block;
        if block.kind() != NodeKind::Function || block.line_count() <= self.max_lines {
            return Ok(Vec::new());
        }
        let violation = ctx.violation(format!(
            "Function '{}' is {} lines long (limit {})",
            block.name(),
            block.line_count(),
            self.max_lines
        ))?;
        Ok(vec![violation])
    }
}

#[cfg(test)]
#[path = "long_block_tests.rs"]
mod tests;
