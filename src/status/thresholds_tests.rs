use super::*;

fn summary(total_violations: usize, error_rules: usize) -> StatusSummary {
    StatusSummary {
        total_rules: 10,
        executed: 10,
        total_violations,
        error_rules,
        ..StatusSummary::default()
    }
}

#[test]
fn zero_violations_is_all_clean() {
    let status = StatusThresholds::default().classify(&summary(0, 0));
    assert_eq!(status, OverallStatus::AllClean);
    assert_eq!(status.label(), "ALL CLEAN");
}

#[test]
fn few_warnings_is_healthy() {
    assert_eq!(
        StatusThresholds::default().classify(&summary(80, 0)),
        OverallStatus::Healthy
    );
}

#[test]
fn moderate_errors_is_good() {
    let status = StatusThresholds::default().classify(&summary(180, 3));
    assert_eq!(status, OverallStatus::Good);
    assert_eq!(status.to_string(), "GOOD (minor issues)");
}

#[test]
fn ceilings_are_exclusive_and_inclusive_as_documented() {
    let thresholds = StatusThresholds::default();
    assert_eq!(thresholds.classify(&summary(150, 0)), OverallStatus::Good);
    assert_eq!(thresholds.classify(&summary(199, 5)), OverallStatus::Good);
    assert_eq!(thresholds.classify(&summary(199, 6)), OverallStatus::NeedsAttention);
    assert_eq!(thresholds.classify(&summary(200, 1)), OverallStatus::NeedsAttention);
    assert_eq!(thresholds.classify(&summary(500, 0)), OverallStatus::WarningsFound);
}

#[test]
fn any_execution_failure_is_critical() {
    let failing = StatusSummary {
        execution_failed: 1,
        ..summary(0, 0)
    };
    assert_eq!(
        StatusThresholds::default().classify(&failing),
        OverallStatus::Critical
    );
}

#[test]
fn load_failures_above_limit_are_critical() {
    let thresholds = StatusThresholds::default();
    let two = StatusSummary {
        load_failed: 2,
        ..summary(0, 0)
    };
    let three = StatusSummary {
        load_failed: 3,
        ..summary(0, 0)
    };

    assert_eq!(thresholds.classify(&two), OverallStatus::AllClean);
    assert_eq!(thresholds.classify(&three), OverallStatus::Critical);
}

#[test]
fn custom_thresholds_apply() {
    let thresholds = StatusThresholds {
        healthy_violation_ceiling: 10,
        ..StatusThresholds::default()
    };
    assert_eq!(thresholds.classify(&summary(80, 0)), OverallStatus::Good);
}

#[test]
fn failure_statuses() {
    assert!(OverallStatus::Critical.is_failure());
    assert!(OverallStatus::NeedsAttention.is_failure());
    assert!(!OverallStatus::WarningsFound.is_failure());
    assert!(!OverallStatus::Good.is_failure());
}

#[test]
fn thresholds_deserialize_with_defaults() {
    let thresholds: StatusThresholds = toml::from_str("good_error_rule_ceiling = 2").unwrap();
    assert_eq!(thresholds.good_error_rule_ceiling, 2);
    assert_eq!(thresholds.healthy_violation_ceiling, 150);
}
