//! Parsing and defaulting behaviour for index configuration.

use std::str::FromStr;

use injector_config::{DEFAULT_DUPLICATE_POLICY, DuplicatePolicy, IndexConfig};
use rstest::rstest;

#[test]
fn default_policy_rejects_duplicates() {
    assert_eq!(DEFAULT_DUPLICATE_POLICY, DuplicatePolicy::Reject);
    assert_eq!(IndexConfig::default().duplicate_policy(), DuplicatePolicy::Reject);
    assert!(!DuplicatePolicy::default().overwrites());
}

#[test]
fn source_parity_overwrites() {
    let config = IndexConfig::source_parity();
    assert!(config.duplicate_policy().overwrites());
}

#[rstest]
#[case::reject("reject", DuplicatePolicy::Reject)]
#[case::overwrite("overwrite", DuplicatePolicy::Overwrite)]
#[case::upper("OVERWRITE", DuplicatePolicy::Overwrite)]
#[case::mixed("Reject", DuplicatePolicy::Reject)]
fn policy_parses_case_insensitively(#[case] input: &str, #[case] expected: DuplicatePolicy) {
    let parsed = DuplicatePolicy::from_str(input).expect("policy should parse");
    assert_eq!(parsed, expected);
}

#[test]
fn policy_rejects_unknown_text() {
    let result = DuplicatePolicy::from_str("first_wins");
    assert!(result.is_err(), "unexpected parse: {result:?}");
}

#[rstest]
#[case::reject(DuplicatePolicy::Reject, "reject")]
#[case::overwrite(DuplicatePolicy::Overwrite, "overwrite")]
fn policy_displays_snake_case(#[case] policy: DuplicatePolicy, #[case] expected: &str) {
    assert_eq!(policy.to_string(), expected);
}

#[test]
fn empty_document_uses_defaults() {
    let config: IndexConfig = serde_json::from_str("{}").expect("deserialize empty config");
    assert_eq!(config, IndexConfig::default());
}

#[test]
fn document_overrides_policy() {
    let config: IndexConfig = serde_json::from_str(r#"{ "duplicate_policy": "overwrite" }"#)
        .expect("deserialize config");
    assert_eq!(config.duplicate_policy(), DuplicatePolicy::Overwrite);
}

#[test]
fn unknown_fields_are_rejected() {
    let result = serde_json::from_str::<IndexConfig>(r#"{ "duplicates": "overwrite" }"#);
    assert!(result.is_err(), "unknown field should fail: {result:?}");
}

#[test]
fn config_round_trips_through_json() {
    let config = IndexConfig::source_parity();
    let json = serde_json::to_string(&config).expect("serialize config");
    assert_eq!(json, r#"{"duplicate_policy":"overwrite"}"#);
}
