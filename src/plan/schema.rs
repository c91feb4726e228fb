//! Structural validation of provider JSON against the plan shape.
//!
//! Every violation is collected with its field path so a single error describes
//! everything wrong with the payload. Unknown keys are ignored.

use crate::error::PlanError;
use crate::plan::{ConfidenceLevel, Plan, RecommendedHorizon};
use serde_json::{Map, Value};

/// Validate a parsed JSON value and convert it into a [`Plan`].
pub fn validate_plan(value: &Value) -> Result<Plan, PlanError> {
    let mut checker = Checker::default();

    if let Some(root) = checker.object(Some(value), "") {
        if let Some(summary) = checker.field_object(root, "", "summary") {
            checker.string(summary, "summary", "title");
            checker.string(summary, "summary", "body");
        }

        if let Some(diagnosis) = checker.field_object(root, "", "diagnosis") {
            checker.boolean(diagnosis, "diagnosis", "canBuyWithCheongyak");
            checker.literal(
                diagnosis,
                "diagnosis",
                "confidenceLevel",
                ConfidenceLevel::LITERALS,
            );
            if let Some(reasons) = checker.array(diagnosis, "diagnosis", "reasons") {
                for (i, reason) in reasons.iter().enumerate() {
                    if !reason.is_string() {
                        checker.mismatch(&format!("diagnosis.reasons[{}]", i), "string", reason);
                    }
                }
            }
        }

        if let Some(strategy) = checker.field_object(root, "", "timeHorizonStrategy") {
            for key in ["now", "threeYears", "fiveYears"] {
                checker.string(strategy, "timeHorizonStrategy", key);
            }
        }

        if let Some(chart) = checker.field_object(root, "", "chartData") {
            if let Some(points) = checker.array(chart, "chartData", "savingProjectionByYear") {
                for (i, point) in points.iter().enumerate() {
                    let path = format!("chartData.savingProjectionByYear[{}]", i);
                    if let Some(point) = checker.object(Some(point), &path) {
                        checker.integer(point, &path, "year");
                        checker.integer(point, &path, "amount");
                    }
                }
            }
        }

        if let Some(meta) = checker.field_object(root, "", "planMeta") {
            checker.literal(
                meta,
                "planMeta",
                "recommendedHorizon",
                RecommendedHorizon::LITERALS,
            );
            checker.string(meta, "planMeta", "reason");
        }

        match root.get("report") {
            None | Some(Value::Null) | Some(Value::String(_)) => {}
            Some(other) => checker.mismatch("report", "string", other),
        }
    }

    if !checker.violations.is_empty() {
        return Err(PlanError::SchemaMismatch(checker.violations.join("; ")));
    }

    serde_json::from_value(value.clone()).map_err(|e| PlanError::SchemaMismatch(e.to_string()))
}

#[derive(Default)]
struct Checker {
    violations: Vec<String>,
}

impl Checker {
    fn mismatch(&mut self, path: &str, expected: &str, got: &Value) {
        self.violations.push(format!(
            "{}: expected {}, got {}",
            display_path(path),
            expected,
            describe(got)
        ));
    }

    fn missing(&mut self, path: &str) {
        self.violations
            .push(format!("{}: field required", display_path(path)));
    }

    fn object<'a>(&mut self, value: Option<&'a Value>, path: &str) -> Option<&'a Map<String, Value>> {
        match value {
            Some(Value::Object(map)) => Some(map),
            Some(other) => {
                self.mismatch(path, "object", other);
                None
            }
            None => {
                self.missing(path);
                None
            }
        }
    }

    fn field_object<'a>(
        &mut self,
        parent: &'a Map<String, Value>,
        parent_path: &str,
        key: &str,
    ) -> Option<&'a Map<String, Value>> {
        self.object(parent.get(key), &join(parent_path, key))
    }

    fn string(&mut self, parent: &Map<String, Value>, parent_path: &str, key: &str) {
        let path = join(parent_path, key);
        match parent.get(key) {
            Some(Value::String(_)) => {}
            Some(other) => self.mismatch(&path, "string", other),
            None => self.missing(&path),
        }
    }

    fn boolean(&mut self, parent: &Map<String, Value>, parent_path: &str, key: &str) {
        let path = join(parent_path, key);
        match parent.get(key) {
            Some(Value::Bool(_)) => {}
            Some(other) => self.mismatch(&path, "boolean", other),
            None => self.missing(&path),
        }
    }

    fn integer(&mut self, parent: &Map<String, Value>, parent_path: &str, key: &str) {
        let path = join(parent_path, key);
        match parent.get(key) {
            Some(Value::Number(n)) if n.is_i64() => {}
            Some(other) => self.mismatch(&path, "integer", other),
            None => self.missing(&path),
        }
    }

    fn literal(
        &mut self,
        parent: &Map<String, Value>,
        parent_path: &str,
        key: &str,
        allowed: &[&str],
    ) {
        let path = join(parent_path, key);
        match parent.get(key) {
            Some(Value::String(s)) if allowed.contains(&s.as_str()) => {}
            Some(Value::String(s)) => self.violations.push(format!(
                "{}: expected one of {}, got \"{}\"",
                path,
                allowed.join(" | "),
                s
            )),
            Some(other) => self.mismatch(&path, &format!("one of {}", allowed.join(" | ")), other),
            None => self.missing(&path),
        }
    }

    fn array<'a>(
        &mut self,
        parent: &'a Map<String, Value>,
        parent_path: &str,
        key: &str,
    ) -> Option<&'a Vec<Value>> {
        let path = join(parent_path, key);
        match parent.get(key) {
            Some(Value::Array(items)) => Some(items),
            Some(other) => {
                self.mismatch(&path, "array", other);
                None
            }
            None => {
                self.missing(&path);
                None
            }
        }
    }
}

fn join(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "(root)"
    } else {
        path
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() => "integer",
        Value::Number(n) if n.is_u64() => "integer out of range",
        Value::Number(_) => "float",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
