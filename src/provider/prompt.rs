//! Plan prompt rendering.

use crate::error::PlanError;
use crate::types::Survey;

const ROLE: &str = "\
# Role
You are a home purchase planning agent for the Korean housing market. Analyse the \
user's survey data and design an asset-building path and the best housing subscription \
(cheongyak) scenario for buying a home.

# Analysis
1. Simulate assets: start from currentFinancialAssets + additionalAssets and accumulate \
monthlySavingAmount up to the target date. Subtract debt repayments from income before \
judging saving capacity.
2. Subscription strategy: weigh unhoused period, subscription account age, dependants and \
marital status. Fields prefixed with `f` describe future plans (for example fChildCount); \
compare timing before and after those events.
3. Loan capacity: compare annualIncome and double-income plans against the target region \
and estimate an affordable loan under debt-service rules.

# Constraints
- Base every statement on the survey fields.
- If the goal is unrealistic, propose a realistic alternative (a cheaper region or a higher \
saving rate).
- Do not recommend specific investment products.";

const SCHEMA: &str = r#"{
  "summary": {"title": "string", "body": "string"},
  "diagnosis": {
    "canBuyWithCheongyak": boolean,
    "confidenceLevel": "HIGH | MEDIUM | LOW",
    "reasons": ["string"]
  },
  "timeHorizonStrategy": {"now": "string", "threeYears": "string", "fiveYears": "string"},
  "chartData": {"savingProjectionByYear": [{"year": number, "amount": number}]},
  "planMeta": {"recommendedHorizon": "SHORT_3 | MID_5 | LONG_10", "reason": "string"}
}"#;

/// Render the plan prompt for a survey.
pub fn build_prompt(survey: &Survey) -> Result<String, PlanError> {
    let user_data = serde_json::to_string_pretty(survey)
        .map_err(|e| PlanError::Internal(format!("Failed to render survey: {}", e)))?;

    Ok(format!(
        "{role}\n\n\
         Using the user data below, output exactly ONE JSON object.\n\
         Do not include explanations, markdown, or code fences (```).\n\
         Follow the schema and key names exactly. Numbers must be integers.\n\n\
         [User data]\n{user_data}\n\n\
         [Output JSON schema]\n{schema}",
        role = ROLE,
        user_data = user_data,
        schema = SCHEMA
    ))
}
