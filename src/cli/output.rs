//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::{FailureClass, PlanError};
use crate::plan::Plan;
use crate::sink::PlanRecord;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;

/// Map domain errors to a string for CLI output.
///
/// Configuration problems are the operator's own and are shown in full;
/// other internal faults are reduced to their public message.
pub fn map_error(e: &PlanError) -> String {
    match e {
        PlanError::Config(_) => e.to_string(),
        _ if e.class() == FailureClass::Internal => e.public_message(),
        _ => e.to_string(),
    }
}

pub fn format_plan(plan: &Plan, pretty: bool) -> Result<String, PlanError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(plan)
    } else {
        serde_json::to_string(plan)
    };
    rendered.map_err(|e| PlanError::Internal(format!("Failed to render plan: {}", e)))
}

/// Format plan records as a table, oldest first.
pub fn format_records(records: &[PlanRecord]) -> String {
    if records.is_empty() {
        return "No plan records".to_string();
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Recorded", "Source", "Survey", "Reason"]);
    for r in records {
        table.add_row(vec![
            r.recorded_at.clone(),
            r.source.as_str().to_string(),
            r.survey.survey_id().unwrap_or_else(|| "-".to_string()),
            r.reason.clone().unwrap_or_else(|| "-".to_string()),
        ]);
    }
    table.to_string()
}
