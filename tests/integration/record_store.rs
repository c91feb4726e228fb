//! Plan records persisted through the sled store

use super::test_utils::{survey, valid_plan_json, Reply, ScriptedClient};
use homeplan::orchestrator::PlanOrchestrator;
use homeplan::plan::PlanSource;
use homeplan::sink::{PlanRecord, SledRecordSink};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

async fn wait_for_records(store: &SledRecordSink, count: usize) -> Vec<PlanRecord> {
    for _ in 0..100 {
        if store.len() >= count {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    store.list().unwrap()
}

#[tokio::test]
async fn test_orchestrator_writes_records_to_store() {
    let temp_dir = TempDir::new().unwrap();
    let store = SledRecordSink::open(&temp_dir.path().join("records")).unwrap();

    let client = ScriptedClient::new(vec![Reply::Text(valid_plan_json())], Reply::Timeout);
    let orchestrator = PlanOrchestrator::builder(client)
        .with_sink(Arc::new(store.clone()))
        .build();

    orchestrator.generate(survey()).await.unwrap();
    let records = wait_for_records(&store, 1).await;
    assert_eq!(records.len(), 1);

    orchestrator.generate(survey()).await.unwrap();
    let records = wait_for_records(&store, 2).await;
    assert_eq!(records.len(), 2);

    assert_eq!(records[0].source, PlanSource::Provider);
    assert_eq!(records[1].source, PlanSource::Cache);
    assert_eq!(records[1].survey.survey_id().as_deref(), Some("42"));
    assert!(records[1].reason.as_deref().unwrap().contains("timed out"));
    assert!(chrono::DateTime::parse_from_rfc3339(&records[0].recorded_at).is_ok());
}
