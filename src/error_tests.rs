use std::path::PathBuf;

use super::*;

#[test]
fn error_display_config() {
    let err = RuleScanError::Config("invalid threshold".to_string());
    assert_eq!(err.to_string(), "Configuration error: invalid threshold");
}

#[test]
fn error_display_file_read() {
    let err = RuleScanError::FileRead {
        path: PathBuf::from("rules/a.json"),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
    };
    assert!(err.to_string().contains("rules/a.json"));
}

#[test]
fn scanner_not_found_carries_requested_path() {
    let err = RuleScanError::scanner_not_found("bots.story.scanners.MissingScanner");
    assert_eq!(
        err.to_string(),
        "Scanner class not found: bots.story.scanners.MissingScanner"
    );
    match err {
        RuleScanError::ScannerLoad { path, .. } => {
            assert_eq!(path, "bots.story.scanners.MissingScanner");
        }
        other => panic!("unexpected variant: {other:?}"),
    }
}

#[test]
fn execution_error_names_scanner() {
    let err = RuleScanError::execution("LongBlockScanner", "boom");
    assert_eq!(err.to_string(), "Scanner LongBlockScanner failed: boom");
}

#[test]
fn invalid_rule_display() {
    let err = RuleScanError::InvalidRule {
        field: "rule_file",
        rule: "naming".to_string(),
    };
    assert!(err.to_string().contains("rule_file"));
    assert!(err.to_string().contains("naming"));
}

#[test]
fn error_type_returns_correct_type() {
    assert_eq!(RuleScanError::Config("x".to_string()).error_type(), "Config");
    assert_eq!(
        RuleScanError::scanner_not_found("a.B").error_type(),
        "ScannerLoad"
    );
    assert_eq!(
        RuleScanError::execution("S", "m").error_type(),
        "ScannerExecution"
    );
    assert_eq!(
        RuleScanError::Io(std::io::Error::other("test")).error_type(),
        "IO"
    );
    assert_eq!(
        RuleScanError::Parse {
            path: PathBuf::from("a.py"),
            line: 3,
            message: "unexpected indent".to_string(),
        }
        .error_type(),
        "Parse"
    );
}
