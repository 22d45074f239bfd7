use std::sync::Mutex;

use super::*;
use crate::context::ScanContext;
use crate::parser::NodeKind;

fn rule() -> Arc<Rule> {
    Arc::new(Rule::new("functions-short", "functions-short.json"))
}

struct Silent;

impl Scanner for Silent {}

/// Flags every function block.
struct FlagFunctions {
    kind: ScannerKind,
}

impl Scanner for FlagFunctions {
    fn kind(&self) -> ScannerKind {
        self.kind
    }

    fn scan_block(&self, ctx: &BlockScanContext<'_>) -> Result<Vec<Violation>> {
        if ctx.block.kind() != NodeKind::Function {
            return Ok(Vec::new());
        }
        Ok(vec![ctx.violation(format!("function {}", ctx.block.name()))?])
    }
}

/// Reports one violation per file name it is handed.
struct PerFile;

impl Scanner for PerFile {
    fn kind(&self) -> ScannerKind {
        ScannerKind::Test
    }

    fn scan_file_with_context(&self, ctx: &FileScanContext<'_>) -> Result<Vec<Violation>> {
        Ok(vec![
            Violation::new(ctx.rule, "seen")?.at_location(ctx.file_path.display().to_string()),
        ])
    }
}

struct Failing;

impl Scanner for Failing {
    fn scan_block(&self, _ctx: &BlockScanContext<'_>) -> Result<Vec<Violation>> {
        Err(crate::RuleScanError::execution("Failing", "gave up"))
    }
}

#[test]
fn kind_accepts_matching_files() {
    assert!(ScannerKind::Code.accepts(false));
    assert!(!ScannerKind::Code.accepts(true));
    assert!(ScannerKind::Test.accepts(true));
    assert!(!ScannerKind::Test.accepts(false));
    assert!(ScannerKind::Any.accepts(true));
    assert!(ScannerKind::Any.accepts(false));
}

#[test]
fn kind_selects_collection_side() {
    let files = FileCollection::new(
        vec![PathBuf::from("tests/test_a.py")],
        vec![PathBuf::from("src/a.py")],
    );

    let code: Vec<&Path> = ScannerKind::Code.files(&files).collect();
    let test: Vec<&Path> = ScannerKind::Test.files(&files).collect();
    let any: Vec<&Path> = ScannerKind::Any.files(&files).collect();

    assert_eq!(code, vec![Path::new("src/a.py")]);
    assert_eq!(test, vec![Path::new("tests/test_a.py")]);
    assert_eq!(any, vec![Path::new("tests/test_a.py"), Path::new("src/a.py")]);
}

#[test]
fn default_entry_points_report_nothing() {
    let rule = rule();
    let base = ScanContext::default();
    let files = FileCollection::new(vec![], vec![PathBuf::from("a.py")]);
    let changed = vec![PathBuf::from("a.py")];
    let scope = Scope::from_sources([("a.py", "def f():\n    pass\n")]);
    let scan = Scan::new(Arc::clone(&rule));

    let silent = Silent;
    assert_eq!(silent.kind(), ScannerKind::Any);
    assert!(
        silent
            .scan_with_context(&ScanFilesContext::new(&base, &rule, &files))
            .unwrap()
            .is_empty()
    );
    assert!(
        silent
            .scan_cross_file_with_context(&CrossFileScanContext::new(
                &base, &rule, &changed, &changed
            ))
            .unwrap()
            .is_empty()
    );
    assert!(
        silent
            .performs_scan_for_one_rule(&scan, &scope, &rule)
            .unwrap()
            .is_empty()
    );
}

#[test]
fn scan_with_context_invokes_callback_per_file() {
    let rule = rule();
    let base = ScanContext::default();
    let files = FileCollection::new(
        vec![PathBuf::from("test_a.py"), PathBuf::from("test_b.py")],
        vec![PathBuf::from("a.py")],
    );
    let seen = Mutex::new(Vec::new());
    let callback = |path: &Path, violations: &[Violation]| {
        seen.lock().unwrap().push((path.to_path_buf(), violations.len()));
    };

    let violations = PerFile
        .scan_with_context(&ScanFilesContext::new(&base, &rule, &files).with_callback(&callback))
        .unwrap();

    assert_eq!(violations.len(), 2);
    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            (PathBuf::from("test_a.py"), 1),
            (PathBuf::from("test_b.py"), 1),
        ]
    );
}

#[test]
fn block_pass_skips_unparsable_files_and_attaches_violations() {
    let rule = rule();
    let scope = Scope::from_sources([
        ("a.py", "class Foo:\n    def bar(self):\n        return 1\n"),
        ("b.py", "def broken(:\n"),
    ]);
    let scan = Scan::new(Arc::clone(&rule));

    let violations = FlagFunctions {
        kind: ScannerKind::Any,
    }
    .performs_scan_for_one_rule(&scan, &scope, &rule)
    .unwrap();

    assert_eq!(violations.len(), 1);
    let violation = &violations[0];
    assert_eq!(violation.message(), "function bar");
    assert_eq!(violation.location(), "a.py");
    assert_eq!(violation.line_number(), Some(2));

    let owner = scope.block(violation.block().unwrap()).unwrap();
    assert_eq!(owner.name(), "bar");
    assert_eq!(owner.violations(), vec![violation.clone()]);
}

#[test]
fn block_pass_respects_scanner_kind() {
    let rule = rule();
    let scope = Scope::from_sources([
        ("src/app.py", "def run():\n    pass\n"),
        ("tests/test_app.py", "def test_run():\n    pass\n"),
    ]);
    let scan = Scan::new(Arc::clone(&rule));

    let code_only = FlagFunctions {
        kind: ScannerKind::Code,
    }
    .performs_scan_for_one_rule(&scan, &scope, &rule)
    .unwrap();
    let test_only = FlagFunctions {
        kind: ScannerKind::Test,
    }
    .performs_scan_for_one_rule(&scan, &scope, &rule)
    .unwrap();

    assert_eq!(code_only.len(), 1);
    assert_eq!(code_only[0].message(), "function run");
    assert_eq!(test_only.len(), 1);
    assert_eq!(test_only[0].message(), "function test_run");
}

#[test]
fn block_pass_propagates_scanner_errors() {
    let rule = rule();
    let scope = Scope::from_sources([("a.py", "def f():\n    pass\n")]);
    let scan = Scan::new(Arc::clone(&rule));

    let err = Failing
        .performs_scan_for_one_rule(&scan, &scope, &rule)
        .unwrap_err();

    assert_eq!(err.error_type(), "ScannerExecution");
}
