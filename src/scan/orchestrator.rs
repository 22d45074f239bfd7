use crate::error::Result;
use crate::registry::ScannerRegistry;
use crate::resource::Scope;
use crate::scanner::Scanner;

use super::Scan;

/// Runs one scanner over one scope for one scan.
///
/// No retries and no parallelism: each call constructs at most one scanner
/// instance and runs it once.
#[derive(Debug, Clone, Copy)]
pub struct ScannerOrchestrator<'r> {
    registry: &'r ScannerRegistry,
}

impl<'r> ScannerOrchestrator<'r> {
    #[must_use]
    pub const fn new(registry: &'r ScannerRegistry) -> Self {
        Self { registry }
    }

    /// Scan `scope` with `scanner`, or with the scanner the registry resolves
    /// for the scan's rule.
    ///
    /// A rule without a scanner binding yields the scan unchanged.
    ///
    /// # Errors
    /// Returns `ScannerLoad` when the binding cannot be resolved, or the
    /// scanner's own error when it fails.
    pub fn performs_scan_on_scope(
        &self,
        mut scan: Scan,
        scope: &Scope,
        scanner: Option<&dyn Scanner>,
    ) -> Result<Scan> {
        if let Some(scanner) = scanner {
            scan.undergoes_scan(scanner, scope)?;
            return Ok(scan);
        }

        let Some(scanner_type) = self.registry.finds_scanner_by_rule(scan.rule())? else {
            tracing::debug!(rule = %scan.rule().name, "rule has no scanner");
            return Ok(scan);
        };
        let scanner = scanner_type.instantiate();
        scan.undergoes_scan(scanner.as_ref(), scope)?;
        Ok(scan)
    }
}
