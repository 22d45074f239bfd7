use crate::scanner::Scanner;

use super::*;

#[derive(Default)]
struct NoopScanner;

impl Scanner for NoopScanner {}

fn registry() -> ScannerRegistry {
    let mut registry = ScannerRegistry::new().with_bot("story");
    registry.register_default::<NoopScanner>("bots.story.scanners.noop_scanner", "NoopScanner");
    registry
}

#[test]
fn resolution_of_rule_without_scanner() {
    let rule = Rule::new("docs", "docs.json");
    assert_eq!(RuleResolution::of(&rule, &registry()), RuleResolution::NoScanner);
}

#[test]
fn resolution_follows_fallback_chain() {
    let rule = Rule::new("noop", "noop.json").with_scanner("NoopScanner");
    assert_eq!(
        RuleResolution::of(&rule, &registry()),
        RuleResolution::Resolved("bots.story.scanners.noop_scanner.NoopScanner".to_string())
    );
}

#[test]
fn resolution_reports_load_error() {
    let rule = Rule::new("ghost", "ghost.json").with_scanner("scanners.ghost.GhostScanner");
    let resolution = RuleResolution::of(&rule, &registry());
    assert_eq!(
        resolution.to_string(),
        "LOAD FAILED: Scanner class not found: scanners.ghost.GhostScanner"
    );
}

#[test]
fn listing_has_one_line_per_rule() {
    let catalog = RuleCatalog::from_rules(vec![
        Rule::new("noop", "b/noop.json").with_scanner("NoopScanner"),
        Rule::new("docs", "a/docs.json"),
    ]);

    let listing = format_rules_listing(&catalog, &registry());
    let lines: Vec<&str> = listing.lines().collect();
    assert_eq!(lines[0], "a/docs.json  [docs]  - -> NO SCANNER");
    assert_eq!(
        lines[1],
        "b/noop.json  [noop]  NoopScanner -> bots.story.scanners.noop_scanner.NoopScanner"
    );
    assert_eq!(lines.last(), Some(&"2 rules"));
}

#[test]
fn listing_of_empty_catalog() {
    let listing = format_rules_listing(&RuleCatalog::default(), &registry());
    assert!(listing.starts_with("No rules found"));
}
