//! Shared test doubles and fixtures

use async_trait::async_trait;
use homeplan::error::{PlanError, StorageError};
use homeplan::provider::TextGenerationClient;
use homeplan::sink::{PlanRecord, RecordSink};
use homeplan::types::Survey;
use parking_lot::Mutex;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// One scripted provider outcome.
#[derive(Debug, Clone)]
pub enum Reply {
    Text(String),
    Timeout,
    Unavailable,
    Fatal,
    /// Sleep past any sane deadline before answering.
    Hang,
}

/// Provider double that replays a script, then repeats `default`.
pub struct ScriptedClient {
    script: Mutex<VecDeque<Reply>>,
    default: Reply,
    calls: AtomicUsize,
}

impl ScriptedClient {
    pub fn new(script: Vec<Reply>, default: Reply) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            default,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn always(reply: Reply) -> Arc<Self> {
        Self::new(Vec::new(), reply)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerationClient for ScriptedClient {
    async fn generate(&self, _prompt: &str) -> Result<String, PlanError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let reply = self
            .script
            .lock()
            .pop_front()
            .unwrap_or_else(|| self.default.clone());
        match reply {
            Reply::Text(text) => Ok(text),
            Reply::Timeout => Err(PlanError::TransportTimeout("scripted timeout".to_string())),
            Reply::Unavailable => Err(PlanError::TransportUnavailable(
                "scripted HTTP 503".to_string(),
            )),
            Reply::Fatal => Err(PlanError::TransportError("scripted HTTP 400".to_string())),
            Reply::Hang => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(valid_plan_json())
            }
        }
    }

    fn provider_name(&self) -> &str {
        "scripted"
    }
}

/// Sink that keeps records in memory.
#[derive(Default)]
pub struct CollectingSink {
    records: Mutex<Vec<PlanRecord>>,
}

impl CollectingSink {
    pub fn records(&self) -> Vec<PlanRecord> {
        self.records.lock().clone()
    }

    /// Poll until `count` records arrived or a second has passed.
    pub async fn wait_for(&self, count: usize) -> Vec<PlanRecord> {
        for _ in 0..100 {
            if self.records.lock().len() >= count {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.records()
    }
}

impl RecordSink for CollectingSink {
    fn save(&self, record: &PlanRecord) -> Result<(), StorageError> {
        self.records.lock().push(record.clone());
        Ok(())
    }
}

/// Sink that always fails.
pub struct FailingSink;

impl RecordSink for FailingSink {
    fn save(&self, _record: &PlanRecord) -> Result<(), StorageError> {
        Err(StorageError::IoError(std::io::Error::new(
            std::io::ErrorKind::Other,
            "disk full",
        )))
    }
}

pub fn survey() -> Survey {
    serde_json::from_value(json!({
        "surveyId": 42,
        "currentDistrict": "Mapo-gu",
        "preferredRegion": "Seoul",
        "monthlySavingAmount": 1_500_000,
        "currentFinancialAssets": 40_000_000,
        "additionalAssets": 5_000_000,
        "annualIncome": 60_000_000
    }))
    .unwrap()
}

pub fn other_survey() -> Survey {
    serde_json::from_value(json!({
        "surveyId": 43,
        "currentDistrict": "Suwon",
        "monthlySavingAmount": 800_000
    }))
    .unwrap()
}

pub fn valid_plan_value() -> serde_json::Value {
    json!({
        "summary": {"title": "Buy in Mapo within five years", "body": "Steady saving gets you there."},
        "diagnosis": {
            "canBuyWithCheongyak": true,
            "confidenceLevel": "HIGH",
            "reasons": ["Long unhoused period", "Account open for seven years"]
        },
        "timeHorizonStrategy": {
            "now": "Keep the subscription account funded",
            "threeYears": "Apply for public sale units",
            "fiveYears": "Buy with a policy loan"
        },
        "chartData": {"savingProjectionByYear": [
            {"year": 1, "amount": 63000000},
            {"year": 2, "amount": 81000000}
        ]},
        "planMeta": {"recommendedHorizon": "MID_5", "reason": "Savings reach the down payment in year five"}
    })
}

pub fn valid_plan_json() -> String {
    valid_plan_value().to_string()
}
