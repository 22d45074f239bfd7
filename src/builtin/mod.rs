//! Reference scanners shipped with the engine, one per entry point.

mod duplicate_file;
mod long_block;
mod test_naming;

pub use duplicate_file::{DuplicateFileScanner, normalized_digest};
pub use long_block::{DEFAULT_MAX_BLOCK_LINES, LongBlockScanner};
pub use test_naming::TestFileNamingScanner;

use crate::registry::ScannerRegistry;

/// Register every builtin under `scanners.<name>_scanner`.
pub fn register_builtin_scanners(registry: &mut ScannerRegistry, max_block_lines: usize) {
    registry.register(
        "scanners.long_block_scanner",
        "LongBlockScanner",
        move || LongBlockScanner::new(max_block_lines),
    );
    registry.register_default::<TestFileNamingScanner>(
        "scanners.test_file_naming_scanner",
        "TestFileNamingScanner",
    );
    registry.register_default::<DuplicateFileScanner>(
        "scanners.duplicate_file_scanner",
        "DuplicateFileScanner",
    );
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
