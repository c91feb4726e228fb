//! Core value types shared across the crate.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

pub const KEY_SURVEY_ID: &str = "surveyId";
pub const KEY_MONTHLY_SAVING: &str = "monthlySavingAmount";
pub const KEY_FINANCIAL_ASSETS: &str = "currentFinancialAssets";
pub const KEY_ADDITIONAL_ASSETS: &str = "additionalAssets";
pub const KEY_CURRENT_DISTRICT: &str = "currentDistrict";
pub const KEY_PREFERRED_REGION: &str = "preferredRegion";
pub const KEY_ANNUAL_INCOME: &str = "annualIncome";

/// A caller-supplied survey: an opaque JSON object of named fields.
///
/// Only a handful of fields are read here; everything else is passed through
/// to the provider prompt untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Survey(Map<String, Value>);

impl Survey {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Integer view of a field. Missing, null, or non-numeric values read as 0;
    /// floats are truncated toward zero.
    pub fn integer(&self, key: &str) -> i64 {
        match self.0.get(key) {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_u64().map(|v| v.min(i64::MAX as u64) as i64))
                .or_else(|| n.as_f64().map(|f| f as i64))
                .unwrap_or(0),
            _ => 0,
        }
    }

    /// Trimmed text of a field, or None when missing, non-string, or blank.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// The backend survey id, rendered as text. Null or absent yields None.
    pub fn survey_id(&self) -> Option<String> {
        match self.0.get(KEY_SURVEY_ID)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn keys(&self) -> Vec<String> {
        self.0.keys().cloned().collect()
    }
}

impl From<Map<String, Value>> for Survey {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Stable identity of a survey; the cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
