//! Fingerprint verification against BLAKE3 directly

use homeplan::fingerprint::{canonical_json, fingerprint};
use homeplan::types::Survey;
use serde_json::json;

fn survey(value: serde_json::Value) -> Survey {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_fingerprint_is_blake3_of_sorted_json() {
    let s = survey(json!({"b": 2, "a": {"d": [3, 1], "c": null}}));
    assert_eq!(
        canonical_json(&serde_json::to_value(&s).unwrap()),
        r#"{"a":{"c":null,"d":[3,1]},"b":2}"#
    );

    let expected = hex::encode(blake3::hash(br#"{"a":{"c":null,"d":[3,1]},"b":2}"#).as_bytes());
    assert_eq!(fingerprint(&s).as_str(), expected);
}

#[test]
fn test_survey_id_prefix() {
    let with_id = survey(json!({"surveyId": "abc", "age": 30}));
    let digest = hex::encode(
        blake3::hash(canonical_json(&json!({"surveyId": "abc", "age": 30})).as_bytes()).as_bytes(),
    );
    assert_eq!(fingerprint(&with_id).as_str(), format!("abc:{}", digest));

    let null_id = survey(json!({"surveyId": null, "age": 30}));
    assert!(!fingerprint(&null_id).as_str().contains(':'));
}

#[test]
fn test_distinct_surveys_distinct_fingerprints() {
    let a = survey(json!({"monthlySavingAmount": 1000000}));
    let b = survey(json!({"monthlySavingAmount": 1000001}));
    assert_ne!(fingerprint(&a), fingerprint(&b));
}
