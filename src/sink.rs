//! Plan record sinks
//!
//! Every terminal outcome (provider result, cache hit, fallback) is handed to a
//! sink as a [`PlanRecord`]. Sinks are best-effort: the orchestrator logs their
//! failures and never lets them affect the response.

use crate::error::StorageError;
use crate::plan::PlanSource;
use crate::types::Survey;
use serde::{Deserialize, Serialize};
use sled::{Db, Tree};
use std::path::Path;
use tracing::info;

const TREE_RECORDS: &str = "plan_records";
const RESULT_PREVIEW_CHARS: usize = 120;

/// One persisted plan outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRecord {
    pub task: String,
    pub survey: Survey,
    pub question: Option<String>,
    /// The returned plan serialized as JSON text
    pub result: String,
    pub source: PlanSource,
    /// Error that pushed the request onto a degraded tier, if any
    pub reason: Option<String>,
    /// UTC, RFC 3339
    pub recorded_at: String,
}

impl PlanRecord {
    pub fn new(
        task: impl Into<String>,
        survey: Survey,
        result: String,
        source: PlanSource,
        reason: Option<String>,
    ) -> Self {
        Self {
            task: task.into(),
            survey,
            question: None,
            result,
            source,
            reason,
            recorded_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Durable destination for plan records.
pub trait RecordSink: Send + Sync {
    fn save(&self, record: &PlanRecord) -> Result<(), StorageError>;
}

/// Sink that only emits a structured log line per record.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingRecordSink;

impl RecordSink for TracingRecordSink {
    fn save(&self, record: &PlanRecord) -> Result<(), StorageError> {
        info!(
            task = %record.task,
            source = %record.source,
            reason = record.reason.as_deref().unwrap_or(""),
            question = record.question.as_deref().unwrap_or(""),
            survey_keys = ?record.survey.keys(),
            result_preview = %preview_chars(&record.result, RESULT_PREVIEW_CHARS),
            recorded_at = %record.recorded_at,
            "Plan record"
        );
        Ok(())
    }
}

fn preview_chars(text: &str, n: usize) -> String {
    text.chars().take(n).collect()
}

/// sled-backed record store. Keys are big-endian ids from sled's monotonic
/// id generator, so iteration order is insertion order.
#[derive(Clone)]
pub struct SledRecordSink {
    db: Db,
    records: Tree,
}

impl SledRecordSink {
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = sled::open(path)?;
        Self::new(db)
    }

    pub fn new(db: Db) -> Result<Self, StorageError> {
        let records = db.open_tree(TREE_RECORDS)?;
        Ok(Self { db, records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, oldest first.
    pub fn list(&self) -> Result<Vec<PlanRecord>, StorageError> {
        let mut out = Vec::new();
        for entry in self.records.iter() {
            let (_, value) = entry?;
            out.push(serde_json::from_slice(&value)?);
        }
        Ok(out)
    }

    /// The newest `limit` records, oldest first.
    pub fn recent(&self, limit: usize) -> Result<Vec<PlanRecord>, StorageError> {
        let mut out = Vec::new();
        for entry in self.records.iter().rev().take(limit) {
            let (_, value) = entry?;
            out.push(serde_json::from_slice(&value)?);
        }
        out.reverse();
        Ok(out)
    }

    pub fn flush(&self) -> Result<(), StorageError> {
        self.db.flush()?;
        Ok(())
    }
}

impl RecordSink for SledRecordSink {
    fn save(&self, record: &PlanRecord) -> Result<(), StorageError> {
        let id = self.db.generate_id()?;
        let value = serde_json::to_vec(record)?;
        self.records.insert(id.to_be_bytes(), value)?;
        Ok(())
    }
}
