use super::*;
use crate::context::BlockScanContext;
use crate::parser::NodeKind;
use crate::registry::ScannerRegistry;

/// Flags methods longer than three lines.
#[derive(Default)]
struct MethodLengthScanner;

impl Scanner for MethodLengthScanner {
    fn scan_block(&self, ctx: &BlockScanContext<'_>) -> Result<Vec<Violation>> {
        let block = ctx.block;
        if block.kind() != NodeKind::Function || block.parent().is_none() || block.line_count() <= 3 {
            return Ok(Vec::new());
        }
        Ok(vec![ctx.violation(format!("method too long: {}", block.name()))?])
    }
}

const A_PY: &str = "\
class Foo:
    def short(self):
        return 1

    def long(self):
        a = 1
        b = 2
        c = 3
        return a + b + c
";

const B_PY: &str = "def broken(:\n    pass\n";

fn scope() -> Scope {
    Scope::from_sources([("a.py", A_PY), ("b.py", B_PY)])
}

fn registry() -> ScannerRegistry {
    let mut registry = ScannerRegistry::new();
    registry.register_default::<MethodLengthScanner>(
        "scanners.method_length_scanner",
        "MethodLengthScanner",
    );
    registry
}

fn rule() -> Arc<Rule> {
    Arc::new(
        Rule::new("short-methods", "code/short_methods.json")
            .with_scanner("scanners.method_length_scanner.MethodLengthScanner"),
    )
}

#[test]
fn end_to_end_scan_flags_one_method_and_skips_broken_file() {
    let registry = registry();
    let scope = scope();

    let scan = ScannerOrchestrator::new(&registry)
        .performs_scan_on_scope(Scan::new(rule()), &scope, None)
        .unwrap();

    assert_eq!(scan.violations().len(), 1);
    let violation = &scan.violations()[0];
    assert_eq!(violation.location(), "a.py");
    assert_eq!(violation.message(), "method too long: long");
    assert_eq!(violation.line_number(), Some(5));
    assert_eq!(scan.violations_at("b.py").count(), 0);
    assert_eq!(scan.error_count(), 1);
    assert_eq!(scan.warning_count(), 0);
}

#[test]
fn violations_are_also_attached_to_blocks() {
    let registry = registry();
    let scope = scope();

    let scan = ScannerOrchestrator::new(&registry)
        .performs_scan_on_scope(Scan::new(rule()), &scope, None)
        .unwrap();

    let block_ref = scan.violations()[0].block().unwrap();
    let block = scope.block(block_ref).unwrap();
    assert_eq!(block.name(), "long");
    assert_eq!(block.violation_count(), 1);
}

#[test]
fn independent_scans_are_idempotent() {
    let registry = registry();
    let orchestrator = ScannerOrchestrator::new(&registry);

    let first = orchestrator
        .performs_scan_on_scope(Scan::new(rule()), &scope(), None)
        .unwrap();
    let second = orchestrator
        .performs_scan_on_scope(Scan::new(rule()), &scope(), None)
        .unwrap();

    let summary = |scan: &Scan| {
        scan.violations()
            .iter()
            .map(|v| (v.message().to_string(), v.severity()))
            .collect::<Vec<_>>()
    };
    assert_eq!(summary(&first), summary(&second));
}

#[test]
fn explicit_scanner_skips_registry() {
    let registry = ScannerRegistry::new();
    let scope = scope();

    let scan = ScannerOrchestrator::new(&registry)
        .performs_scan_on_scope(Scan::new(rule()), &scope, Some(&MethodLengthScanner))
        .unwrap();

    assert_eq!(scan.violations().len(), 1);
    assert_eq!(registry.lookup_count(), 0);
}

#[test]
fn rule_without_scanner_yields_empty_scan() {
    let registry = registry();
    let rule = Arc::new(Rule::new("docs", "docs.json"));

    let scan = ScannerOrchestrator::new(&registry)
        .performs_scan_on_scope(Scan::new(rule), &scope(), None)
        .unwrap();

    assert!(scan.violations().is_empty());
}

#[test]
fn unresolvable_scanner_is_a_load_error() {
    let registry = ScannerRegistry::new();

    let err = ScannerOrchestrator::new(&registry)
        .performs_scan_on_scope(Scan::new(rule()), &scope(), None)
        .unwrap_err();

    assert_eq!(err.error_type(), "ScannerLoad");
}

#[test]
fn record_appends_in_order() {
    let rule = rule();
    let mut scan = Scan::new(Arc::clone(&rule));

    scan.record([
        Violation::new(&rule, "first").unwrap(),
        Violation::new(&rule, "second")
            .unwrap()
            .with_severity(Severity::Warning),
    ]);
    scan.record([Violation::new(&rule, "third").unwrap()]);

    let messages: Vec<&str> = scan.violations().iter().map(Violation::message).collect();
    assert_eq!(messages, vec!["first", "second", "third"]);
    assert_eq!(scan.warning_count(), 1);
    assert_eq!(scan.into_violations().len(), 3);
}
