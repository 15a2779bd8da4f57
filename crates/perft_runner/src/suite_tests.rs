use super::*;

const SMALL_SUITE: &str = r#"
name = "small"

[[case]]
name = "start"
fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
depths = [{ depth = 1, nodes = 20 }, { depth = 2, nodes = 400 }]

[[case]]
name = "position 3"
fen = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1"
depths = [{ depth = 1, nodes = 14 }, { depth = 2, nodes = 191 }]
"#;

#[test]
fn test_parse_suite() {
    let config = SuiteConfig::from_toml_str(SMALL_SUITE).unwrap();
    assert_eq!(config.name, "small");
    assert_eq!(config.max_depth, None);
    assert_eq!(config.cases.len(), 2);
    assert_eq!(config.cases[1].name, "position 3");
    assert_eq!(
        config.cases[0].depths[1],
        DepthExpectation { depth: 2, nodes: 400 }
    );
}

#[test]
fn test_defaults() {
    let config = SuiteConfig::from_toml_str("").unwrap();
    assert_eq!(config.name, "perft");
    assert!(config.cases.is_empty());
}

#[test]
fn test_rejects_missing_fields() {
    let text = r#"
[[case]]
name = "no fen"
depths = []
"#;
    assert!(SuiteConfig::from_toml_str(text).is_err());
}

#[test]
fn test_run_suite_passes() {
    let config = SuiteConfig::from_toml_str(SMALL_SUITE).unwrap();
    let report = run_suite(&config).unwrap();
    assert!(report.all_passed());
    assert_eq!(report.passed, 4);
    assert_eq!(report.total_nodes, 20 + 400 + 14 + 191);
    assert_eq!(report.results.len(), 4);
}

#[test]
fn test_run_suite_records_mismatch_and_skips() {
    let mut config = SuiteConfig::from_toml_str(SMALL_SUITE).unwrap();
    config.cases[0].depths[0].nodes = 21;
    config.max_depth = Some(1);

    let report = run_suite(&config).unwrap();
    assert!(!report.all_passed());
    assert_eq!(report.failed, 1);
    assert_eq!(report.passed, 1);
    assert_eq!(report.skipped, 2);

    let bad = &report.results[0];
    assert_eq!((bad.expected, bad.actual, bad.passed), (21, 20, false));
}

#[test]
fn test_invalid_fen_is_an_error() {
    let mut config = SuiteConfig::from_toml_str(SMALL_SUITE).unwrap();
    config.cases[1].fen = "8/8/8 w - - 0 1".to_string();
    let err = run_suite(&config).unwrap_err();
    assert!(err.to_string().contains("position 3"));
}

#[test]
fn test_report_json() {
    let config = SuiteConfig::from_toml_str(SMALL_SUITE).unwrap();
    let report = run_suite(&config).unwrap();
    let json = report.to_json().unwrap();
    let back: SuiteReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back.name, "small");
    assert_eq!(back.results.len(), report.results.len());
}

#[test]
fn test_bundled_standard_suite_parses() {
    let config = SuiteConfig::from_toml_str(include_str!("../standard.toml")).unwrap();
    assert_eq!(config.name, "standard");
    assert_eq!(config.max_depth, Some(4));
    assert_eq!(config.cases.len(), 6);
    for case in &config.cases {
        assert!(Position::from_fen(&case.fen).is_ok(), "{}", case.name);
        assert_eq!(case.depths[0].depth, 1);
    }
}
