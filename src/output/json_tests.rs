use std::sync::Arc;

use serde_json::Value;

use super::*;
use crate::rule::Rule;
use crate::status::StatusAggregator;
use crate::violation::Violation;

#[test]
fn json_carries_status_summary_and_violations() {
    let rule = Arc::new(Rule::new("short", "code/short.json"));
    let outcomes = vec![
        RuleOutcome::executed(
            &rule,
            vec![Violation::new(&rule, "too long").unwrap().at_location("a.py").at_line(3)],
        ),
        RuleOutcome::no_scanner(&Arc::new(Rule::new("docs", "docs.json"))),
    ];
    let report = StatusAggregator::default().build(&outcomes);

    let json: Value = serde_json::from_str(&JsonFormatter.format(&report).unwrap()).unwrap();

    assert_eq!(json["status"], "GOOD");
    assert_eq!(json["label"], "GOOD (minor issues)");
    assert_eq!(json["summary"]["total_violations"], 1);
    assert_eq!(json["summary"]["no_scanner"], 1);
    assert_eq!(json["rules"].as_array().unwrap().len(), 2);

    let violation = &json["rules"][0]["violations"][0];
    assert_eq!(violation["rule"], "short");
    assert_eq!(violation["rule_file"], "code/short.json");
    assert_eq!(violation["violation_message"], "too long");
    assert_eq!(violation["severity"], "error");
    assert_eq!(violation["line_number"], 3);
    assert_eq!(violation["location"], "a.py");
}

#[test]
fn json_of_empty_run_is_all_clean() {
    let report = StatusAggregator::default().build(&[]);
    let json: Value = serde_json::from_str(&JsonFormatter.format(&report).unwrap()).unwrap();

    assert_eq!(json["status"], "ALL_CLEAN");
    assert_eq!(json["label"], "ALL CLEAN");
    assert!(json["rules"].as_array().unwrap().is_empty());
}
