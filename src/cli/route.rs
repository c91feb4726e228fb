//! CLI route: one dispatch table from parsed commands to library operations.

use crate::cli::output::{format_plan, format_records};
use crate::cli::parse::Commands;
use crate::config::{ConfigLoader, PlannerConfig};
use crate::error::PlanError;
use crate::fallback::synthesize;
use crate::fingerprint::fingerprint;
use crate::orchestrator::PlanOrchestrator;
use crate::provider::GeminiClient;
use crate::report::ensure_report;
use crate::sink::{RecordSink, SledRecordSink, TracingRecordSink};
use crate::types::Survey;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Loaded configuration plus command dispatch.
pub struct RunContext {
    config: PlannerConfig,
}

impl RunContext {
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, PlanError> {
        let config = ConfigLoader::load(config_path.as_deref())?;
        Ok(Self { config })
    }

    pub fn from_config(config: PlannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn execute(&self, command: &Commands) -> Result<String, PlanError> {
        match command {
            Commands::Plan { survey, pretty } => self.handle_plan(survey, *pretty),
            Commands::Fallback { survey, pretty } => {
                let survey = read_survey(survey)?;
                let plan = ensure_report(synthesize(&survey), &survey);
                format_plan(&plan, *pretty)
            }
            Commands::Fingerprint { survey } => {
                let survey = read_survey(survey)?;
                Ok(fingerprint(&survey).to_string())
            }
            Commands::Records { limit } => {
                let store = SledRecordSink::open(&self.config.storage.records_path)?;
                Ok(format_records(&store.recent(*limit)?))
            }
        }
    }

    fn handle_plan(&self, survey_path: &Path, pretty: bool) -> Result<String, PlanError> {
        let survey = read_survey(survey_path)?;
        let client = GeminiClient::new(&self.config.provider)?;

        let store = match SledRecordSink::open(&self.config.storage.records_path) {
            Ok(store) => Some(store),
            Err(e) => {
                warn!(
                    records_path = %self.config.storage.records_path.display(),
                    error = %e,
                    "Record store unavailable, records will only be logged"
                );
                None
            }
        };
        let sink: Arc<dyn RecordSink> = match &store {
            Some(store) => Arc::new(store.clone()),
            None => Arc::new(TracingRecordSink),
        };

        let orchestrator = PlanOrchestrator::builder(Arc::new(client))
            .with_sink(sink)
            .with_breaker_config(self.config.breaker.clone())
            .with_call_timeout(Duration::from_secs(self.config.provider.timeout_secs))
            .build();

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|e| PlanError::Internal(format!("Failed to start runtime: {}", e)))?;
        let result = runtime.block_on(orchestrator.generate(survey));
        // Let pending record writes finish before the process exits.
        runtime.shutdown_timeout(SHUTDOWN_GRACE);

        if let Some(store) = &store {
            if let Err(e) = store.flush() {
                warn!(error = %e, "Failed to flush record store");
            }
        }

        let response = result?;
        info!(
            source = %response.source,
            fingerprint = %response.fingerprint,
            "Plan served"
        );
        format_plan(&response.plan, pretty)
    }
}

/// Read a survey JSON object from a file.
pub fn read_survey(path: &Path) -> Result<Survey, PlanError> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        PlanError::Config(format!("Failed to read survey {}: {}", path.display(), e))
    })?;
    serde_json::from_str(&text).map_err(|e| {
        PlanError::Config(format!(
            "Survey {} is not a JSON object: {}",
            path.display(),
            e
        ))
    })
}
