//! Property-based tests for determinism guarantees

use homeplan::fallback::synthesize;
use homeplan::fingerprint::fingerprint;
use homeplan::report::ensure_report;
use homeplan::types::Survey;
use proptest::prelude::*;
use serde_json::{Map, Value};

fn field_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z0-9 -]{0,12}".prop_map(Value::from),
    ]
}

fn survey_fields() -> impl Strategy<Value = Vec<(String, Value)>> {
    proptest::collection::btree_map("[a-zA-Z]{1,10}", field_value(), 0..8)
        .prop_map(|m| m.into_iter().collect())
}

/// Test that field order never changes the fingerprint
#[test]
fn test_fingerprint_ignores_field_order() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&survey_fields(), |fields| {
            let forward: Map<String, Value> = fields.iter().cloned().collect();
            let backward: Map<String, Value> = fields.iter().rev().cloned().collect();

            prop_assert_eq!(
                fingerprint(&Survey::new(forward)),
                fingerprint(&Survey::new(backward))
            );
            Ok(())
        })
        .unwrap();
}

/// Test that fallback plans depend only on the survey
#[test]
fn test_fallback_is_deterministic() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(any::<i64>(), any::<i64>(), any::<i64>(), "[a-zA-Z -]{0,16}"),
            |(monthly, assets, additional, district)| {
                let mut fields = Map::new();
                fields.insert("monthlySavingAmount".to_string(), Value::from(monthly));
                fields.insert("currentFinancialAssets".to_string(), Value::from(assets));
                fields.insert("additionalAssets".to_string(), Value::from(additional));
                fields.insert("currentDistrict".to_string(), Value::from(district));
                let survey = Survey::new(fields);

                let first = serde_json::to_string(&ensure_report(synthesize(&survey), &survey))
                    .unwrap();
                let second = serde_json::to_string(&ensure_report(synthesize(&survey), &survey))
                    .unwrap();
                prop_assert_eq!(first, second);

                let plan = synthesize(&survey);
                prop_assert_eq!(plan.chart_data.saving_projection_by_year.len(), 3);
                prop_assert!(!plan.diagnosis.eligible);
                Ok(())
            },
        )
        .unwrap();
}
