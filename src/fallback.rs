//! Fallback plan synthesis
//!
//! Builds a conservative plan from raw survey figures without contacting the
//! provider. Output depends only on the survey, so a fallback can be cached
//! and replayed byte for byte.

use crate::plan::{
    ChartData, ConfidenceLevel, Diagnosis, Plan, PlanMeta, RecommendedHorizon, SavingProjection,
    Summary, TimeHorizonStrategy,
};
use crate::report::format_won;
use crate::types::{
    Survey, KEY_ADDITIONAL_ASSETS, KEY_CURRENT_DISTRICT, KEY_FINANCIAL_ASSETS, KEY_MONTHLY_SAVING,
    KEY_PREFERRED_REGION,
};

pub const DISTRICT_PLACEHOLDER: &str = "your current area";
pub const PROJECTION_YEARS: i64 = 3;

/// Synthesize a conservative plan from the survey alone.
pub fn synthesize(survey: &Survey) -> Plan {
    let district = survey
        .text(KEY_CURRENT_DISTRICT)
        .unwrap_or(DISTRICT_PLACEHOLDER);
    let region = survey.text(KEY_PREFERRED_REGION);
    let monthly = survey.integer(KEY_MONTHLY_SAVING);
    let base = survey
        .integer(KEY_FINANCIAL_ASSETS)
        .saturating_add(survey.integer(KEY_ADDITIONAL_ASSETS));

    let projection = project_savings(base, monthly);
    let final_amount = projection.last().map(|p| p.amount).unwrap_or(base);

    let target = match region {
        Some(region) => format!("{} (preferred: {})", district, region),
        None => district.to_string(),
    };

    Plan {
        summary: Summary {
            title: format!("Conservative savings plan around {}", district),
            body: format!(
                "A detailed analysis is temporarily unavailable, so this plan is based only on \
                 your reported assets and monthly savings. Starting from {}, steady saving could \
                 reach about {} in {} years while you look at housing in {}.",
                format_won(base),
                format_won(final_amount),
                PROJECTION_YEARS,
                target
            ),
        },
        diagnosis: Diagnosis {
            eligible: false,
            confidence: ConfidenceLevel::Low,
            reasons: vec![
                "Subscription eligibility could not be assessed without the full analysis."
                    .to_string(),
                format!(
                    "Projection assumes saving {} every month with no major expenses.",
                    format_won(monthly)
                ),
            ],
        },
        time_horizon_strategy: TimeHorizonStrategy {
            now: format!(
                "Keep saving {} a month and confirm your subscription account status.",
                format_won(monthly)
            ),
            three_years: format!(
                "Review accumulated funds of about {} against prices in {}.",
                format_won(final_amount),
                district
            ),
            five_years: format!(
                "Re-run a full plan before committing to a purchase in {}.",
                target
            ),
        },
        chart_data: ChartData {
            saving_projection_by_year: projection,
        },
        plan_meta: PlanMeta {
            recommended_horizon: RecommendedHorizon::Mid5,
            reason: "A mid-term horizon is the safe default until a full analysis is available."
                .to_string(),
        },
        report: None,
    }
}

/// Yearly running totals: base plus twelve months of saving per year.
pub fn project_savings(base: i64, monthly: i64) -> Vec<SavingProjection> {
    let yearly = monthly.saturating_mul(12);
    let mut running = base;
    (1..=PROJECTION_YEARS)
        .map(|year| {
            running = running.saturating_add(yearly);
            SavingProjection {
                year,
                amount: running,
            }
        })
        .collect()
}
