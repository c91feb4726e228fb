//! Plan model
//!
//! The validated output of plan generation. Field names on the wire follow the
//! JSON schema handed to the provider in the prompt.

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod schema;

pub use schema::validate_plan;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    pub const LITERALS: &'static [&'static str] = &["HIGH", "MEDIUM", "LOW"];

    pub fn as_str(self) -> &'static str {
        match self {
            ConfidenceLevel::High => "HIGH",
            ConfidenceLevel::Medium => "MEDIUM",
            ConfidenceLevel::Low => "LOW",
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecommendedHorizon {
    #[serde(rename = "SHORT_3")]
    Short3,
    #[serde(rename = "MID_5")]
    Mid5,
    #[serde(rename = "LONG_10")]
    Long10,
}

impl RecommendedHorizon {
    pub const LITERALS: &'static [&'static str] = &["SHORT_3", "MID_5", "LONG_10"];

    pub fn as_str(self) -> &'static str {
        match self {
            RecommendedHorizon::Short3 => "SHORT_3",
            RecommendedHorizon::Mid5 => "MID_5",
            RecommendedHorizon::Long10 => "LONG_10",
        }
    }

    pub fn years(self) -> u32 {
        match self {
            RecommendedHorizon::Short3 => 3,
            RecommendedHorizon::Mid5 => 5,
            RecommendedHorizon::Long10 => 10,
        }
    }
}

impl fmt::Display for RecommendedHorizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnosis {
    /// Whether the person can realistically buy through a subscription (cheongyak).
    #[serde(rename = "canBuyWithCheongyak")]
    pub eligible: bool,
    #[serde(rename = "confidenceLevel")]
    pub confidence: ConfidenceLevel,
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeHorizonStrategy {
    pub now: String,
    pub three_years: String,
    pub five_years: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingProjection {
    pub year: i64,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub saving_projection_by_year: Vec<SavingProjection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanMeta {
    pub recommended_horizon: RecommendedHorizon,
    pub reason: String,
}

/// A home purchase plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub summary: Summary,
    pub diagnosis: Diagnosis,
    pub time_horizon_strategy: TimeHorizonStrategy,
    pub chart_data: ChartData,
    pub plan_meta: PlanMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<String>,
}

impl Plan {
    /// True when the narrative report is present and not blank.
    pub fn has_report(&self) -> bool {
        self.report
            .as_deref()
            .map(|r| !r.trim().is_empty())
            .unwrap_or(false)
    }
}

/// Which tier produced a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanSource {
    Provider,
    Cache,
    Fallback,
}

impl PlanSource {
    pub fn as_str(self) -> &'static str {
        match self {
            PlanSource::Provider => "provider",
            PlanSource::Cache => "cache",
            PlanSource::Fallback => "fallback",
        }
    }
}

impl fmt::Display for PlanSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
