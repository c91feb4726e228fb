//! Provider output extraction
//!
//! Turns free-form provider text into a validated plan:
//! fence strip -> brace slice -> JSON parse -> schema validation.
//! Every failure here is a content failure and is surfaced to the caller as-is.

use crate::error::PlanError;
use crate::plan::{validate_plan, Plan};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Characters of offending text carried in error previews.
pub const PREVIEW_CHARS: usize = 200;

static FENCED_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)```(?:json)?\s*(.*?)\s*```").expect("fenced block pattern is valid")
});

/// Run the full pipeline over raw provider text.
pub fn extract_plan(raw: &str) -> Result<Plan, PlanError> {
    let value = parse_json_object(raw)?;
    validate_plan(&value)
}

/// Extract and parse the JSON object embedded in provider text.
pub fn parse_json_object(raw: &str) -> Result<Value, PlanError> {
    let sliced = extract_json_object(raw)?;
    serde_json::from_str(sliced).map_err(|e| PlanError::ParseError {
        message: e.to_string(),
        preview: preview(sliced),
    })
}

/// Locate the JSON object text inside provider output.
///
/// If a fenced block is present only its interior is considered; the result is
/// the span from the first `{` to the last `}`.
pub fn extract_json_object(raw: &str) -> Result<&str, PlanError> {
    if raw.trim().is_empty() {
        return Err(PlanError::ExtractionError {
            message: "empty provider response".to_string(),
            preview: String::new(),
        });
    }

    let text = match FENCED_BLOCK.captures(raw).and_then(|c| c.get(1)) {
        Some(inner) => inner.as_str().trim(),
        None => raw,
    };

    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if end > start => Ok(text[start..=end].trim()),
        _ => Err(PlanError::ExtractionError {
            message: "no JSON object delimiters found".to_string(),
            preview: preview(text),
        }),
    }
}

/// First [`PREVIEW_CHARS`] characters of `text`, never splitting a character.
pub fn preview(text: &str) -> String {
    text.chars().take(PREVIEW_CHARS).collect()
}
