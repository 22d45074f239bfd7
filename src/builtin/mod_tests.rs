use super::*;
use crate::rule::Rule;

#[test]
fn builtins_resolve_by_short_path() {
    let mut registry = ScannerRegistry::new();
    register_builtin_scanners(&mut registry, 10);

    for class_name in ["LongBlockScanner", "TestFileNamingScanner", "DuplicateFileScanner"] {
        let rule = Rule::new("r", "r.json").with_scanner(class_name);
        let found = registry.finds_scanner_by_rule(&rule).unwrap().unwrap();
        assert_eq!(found.class_name(), class_name);
    }
    assert_eq!(registry.scanner_types().count(), 3);
}

#[test]
fn long_block_factory_uses_configured_limit() {
    use std::sync::Arc;

    use crate::resource::Scope;
    use crate::scan::Scan;

    let mut registry = ScannerRegistry::new();
    register_builtin_scanners(&mut registry, 1);
    let scanner = registry.resolve("LongBlockScanner").unwrap().instantiate();
    let rule = Arc::new(Rule::new("r", "r.json"));
    let scope = Scope::from_sources([("a.py", "def f():\n    return 1\n")]);

    let found = scanner
        .performs_scan_for_one_rule(&Scan::new(Arc::clone(&rule)), &scope, &rule)
        .unwrap();

    assert_eq!(found.len(), 1);
}
