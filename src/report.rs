//! Report ensurer
//!
//! Every plan leaving the orchestrator carries a non-empty narrative. A plan
//! whose `report` is missing or blank gets one rendered from its structured
//! fields; a plan that already has one is passed through untouched.

use crate::plan::Plan;
use crate::types::{
    Survey, KEY_ADDITIONAL_ASSETS, KEY_ANNUAL_INCOME, KEY_CURRENT_DISTRICT, KEY_FINANCIAL_ASSETS,
    KEY_MONTHLY_SAVING, KEY_PREFERRED_REGION,
};
use once_cell::sync::Lazy;
use regex::Regex;

/// Share of annual income assumed available for debt service.
const DEBT_SERVICE_RATIO_PERCENT: i64 = 40;

static LEADING_CONNECTIVES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:(?:and|also|then|so|next|additionally|furthermore|meanwhile|first|finally|그리고|또한|따라서|그러므로|먼저|우선)[\s,]+)+",
    )
    .expect("connective pattern is valid")
});

static TRAILING_PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s.!?。,;:…]+$").expect("punctuation pattern is valid"));

/// Guarantee a non-empty report on `plan`.
pub fn ensure_report(mut plan: Plan, survey: &Survey) -> Plan {
    if plan.has_report() {
        return plan;
    }
    plan.report = Some(render_report(&plan, survey));
    plan
}

/// Render the five-section narrative for a plan.
pub fn render_report(plan: &Plan, survey: &Survey) -> String {
    let sections = [
        diagnosis_section(plan),
        snapshot_section(plan, survey),
        guidance_section(plan),
        location_section(survey),
        closing_section(),
    ];
    format!("# {}\n\n{}", plan.summary.title.trim(), sections.join("\n\n"))
}

fn diagnosis_section(plan: &Plan) -> String {
    let d = &plan.diagnosis;
    let verdict = if d.eligible {
        "Buying through a housing subscription looks achievable"
    } else {
        "Buying through a housing subscription looks difficult for now"
    };
    let mut lines = vec![
        "## 1. Diagnosis".to_string(),
        format!("{} (confidence: {}).", verdict, d.confidence),
    ];
    for reason in d.reasons.iter().filter(|r| !r.trim().is_empty()) {
        lines.push(format!("- {}", reason.trim()));
    }
    let meta = &plan.plan_meta;
    lines.push(format!(
        "Recommended horizon: {} years ({}). {}",
        meta.recommended_horizon.years(),
        meta.recommended_horizon,
        meta.reason.trim()
    ));
    lines.join("\n")
}

fn snapshot_section(plan: &Plan, survey: &Survey) -> String {
    let assets = survey
        .integer(KEY_FINANCIAL_ASSETS)
        .saturating_add(survey.integer(KEY_ADDITIONAL_ASSETS));
    let income = survey.integer(KEY_ANNUAL_INCOME);
    let monthly = survey.integer(KEY_MONTHLY_SAVING);

    let mut lines = vec![
        "## 2. Financial snapshot".to_string(),
        format!("- Current assets: {}", format_won(assets)),
    ];
    if income > 0 {
        lines.push(format!("- Annual income: {}", format_won(income)));
    }
    lines.push(format!("- Monthly saving: {}", format_won(monthly)));

    let projection = &plan.chart_data.saving_projection_by_year;
    if projection.is_empty() {
        lines.push("No saving projection is available.".to_string());
    } else {
        lines.push("Projected savings:".to_string());
        for point in projection {
            lines.push(format!("- Year {}: {}", point.year, format_won(point.amount)));
        }
    }
    lines.join("\n")
}

fn guidance_section(plan: &Plan) -> String {
    let s = &plan.time_horizon_strategy;
    let mut lines = vec!["## 3. What to do".to_string()];
    for (label, text) in [
        ("Now", &s.now),
        ("Within 3 years", &s.three_years),
        ("Within 5 years", &s.five_years),
    ] {
        let phrase = clean_phrase(text);
        if phrase.is_empty() {
            lines.push(format!("- {}: no specific action.", label));
        } else {
            lines.push(format!("- {}: {}.", label, phrase));
        }
    }
    lines.join("\n")
}

fn location_section(survey: &Survey) -> String {
    let mut lines = vec!["## 4. Location and loans".to_string()];
    match (
        survey.text(KEY_CURRENT_DISTRICT),
        survey.text(KEY_PREFERRED_REGION),
    ) {
        (Some(district), Some(region)) if district != region => lines.push(format!(
            "Compare prices and subscription supply in {} with your current area, {}.",
            region, district
        )),
        (Some(district), _) => lines.push(format!(
            "Check upcoming subscription announcements in and around {}.",
            district
        )),
        (None, Some(region)) => lines.push(format!(
            "Check upcoming subscription announcements in {}.",
            region
        )),
        (None, None) => lines.push(
            "No location was given; narrow down candidate districts before applying.".to_string(),
        ),
    }

    let income = survey.integer(KEY_ANNUAL_INCOME);
    if income > 0 {
        let ceiling = income.saturating_mul(DEBT_SERVICE_RATIO_PERCENT) / 100;
        lines.push(format!(
            "At a {}% debt-service ratio, yearly loan repayments should stay under about {}.",
            DEBT_SERVICE_RATIO_PERCENT,
            format_won(ceiling)
        ));
    } else {
        lines.push("Income was not provided, so loan capacity could not be estimated.".to_string());
    }
    lines.join("\n")
}

fn closing_section() -> String {
    "## 5. Caution\nThis plan is an estimate from the figures you provided. Income, asset and \
     eligibility rules differ by announcement, so confirm the details of each notice before \
     applying."
        .to_string()
}

/// Drop leading connective words and trailing punctuation from a phrase.
pub fn clean_phrase(text: &str) -> String {
    let trimmed = text.trim();
    let without_lead = LEADING_CONNECTIVES.replace(trimmed, "");
    let cleaned = TRAILING_PUNCTUATION.replace(without_lead.trim(), "");
    capitalize_first(cleaned.trim())
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Format an amount in won with thousands separators.
pub fn format_won(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if amount < 0 {
        format!("-{} KRW", grouped)
    } else {
        format!("{} KRW", grouped)
    }
}
