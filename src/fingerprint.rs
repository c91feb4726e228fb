//! Survey fingerprinting using BLAKE3
//!
//! Fingerprint = surveyId ":" hex(blake3(canonical_json(survey)))
//!
//! The canonical form sorts object keys at every depth, so field order in the
//! incoming survey never changes the fingerprint.

use crate::types::{Fingerprint, Survey};
use blake3::Hasher;
use serde_json::Value;
use std::collections::BTreeMap;

/// Compute the cache identity of a survey.
pub fn fingerprint(survey: &Survey) -> Fingerprint {
    let digest = hex::encode(survey_digest(survey));
    match survey.survey_id() {
        Some(id) => Fingerprint::new(format!("{}:{}", id, digest)),
        None => Fingerprint::new(digest),
    }
}

/// BLAKE3 digest of the canonical survey serialization.
pub fn survey_digest(survey: &Survey) -> [u8; 32] {
    let mut hasher = Hasher::new();
    hasher.update(canonical_json(&Value::Object(survey.fields().clone())).as_bytes());
    *hasher.finalize().as_bytes()
}

/// Serialize a JSON value with lexicographically sorted keys.
pub fn canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let sorted: BTreeMap<&String, &Value> = map.iter().collect();
            out.push('{');
            for (i, (key, item)) in sorted.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String(key.clone()).to_string());
                out.push(':');
                write_canonical(item, out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}
