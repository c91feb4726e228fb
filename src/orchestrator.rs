//! Plan Orchestrator
//!
//! Composes fingerprinting, the circuit breaker, the plan cache, fallback
//! synthesis, the extraction pipeline and the report ensurer behind a single
//! operation, [`PlanOrchestrator::generate_plan`].
//!
//! Failure policy has two tiers. Provider outages (timeout, overload) degrade
//! to a cached plan and then to a deterministic fallback. Everything else,
//! including malformed provider output, is returned to the caller unchanged.
//!
//! Cache and breaker share one lock. It is only taken for short check/update
//! steps and is never held while the provider call is in flight.

use crate::breaker::{BreakerConfig, BreakerSnapshot, CircuitBreaker, Clock, SystemClock};
use crate::cache::PlanCache;
use crate::error::PlanError;
use crate::extract::extract_plan;
use crate::fallback::synthesize;
use crate::fingerprint::fingerprint;
use crate::plan::{Plan, PlanSource};
use crate::provider::{build_prompt, TextGenerationClient};
use crate::report::ensure_report;
use crate::sink::{PlanRecord, RecordSink, TracingRecordSink};
use crate::types::{Fingerprint, Survey};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const RECORD_TASK: &str = "plan";
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(300);

/// A generated plan together with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanResponse {
    pub plan: Plan,
    pub source: PlanSource,
    pub fingerprint: Fingerprint,
}

#[derive(Debug, Default)]
struct SharedState {
    cache: PlanCache,
    breaker: CircuitBreaker,
}

pub struct PlanOrchestrator {
    client: Arc<dyn TextGenerationClient>,
    sink: Arc<dyn RecordSink>,
    clock: Arc<dyn Clock>,
    call_timeout: Duration,
    state: Mutex<SharedState>,
}

pub struct PlanOrchestratorBuilder {
    client: Arc<dyn TextGenerationClient>,
    sink: Arc<dyn RecordSink>,
    clock: Arc<dyn Clock>,
    breaker: BreakerConfig,
    call_timeout: Duration,
}

impl PlanOrchestratorBuilder {
    pub fn with_sink(mut self, sink: Arc<dyn RecordSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_breaker_config(mut self, breaker: BreakerConfig) -> Self {
        self.breaker = breaker;
        self
    }

    pub fn with_call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    pub fn build(self) -> PlanOrchestrator {
        PlanOrchestrator {
            client: self.client,
            sink: self.sink,
            clock: self.clock,
            call_timeout: self.call_timeout,
            state: Mutex::new(SharedState {
                cache: PlanCache::new(),
                breaker: CircuitBreaker::new(&self.breaker),
            }),
        }
    }
}

impl PlanOrchestrator {
    pub fn builder(client: Arc<dyn TextGenerationClient>) -> PlanOrchestratorBuilder {
        PlanOrchestratorBuilder {
            client,
            sink: Arc::new(TracingRecordSink),
            clock: Arc::new(SystemClock),
            breaker: BreakerConfig::default(),
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    /// Generate a plan for a survey.
    pub async fn generate_plan(&self, survey: Survey) -> Result<Plan, PlanError> {
        self.generate(survey).await.map(|response| response.plan)
    }

    /// Generate a plan and report which tier produced it.
    pub async fn generate(&self, survey: Survey) -> Result<PlanResponse, PlanError> {
        let fingerprint = fingerprint(&survey);

        let short_circuit = {
            let state = self.state.lock();
            if state.breaker.is_open(self.clock.now()) {
                Some(state.cache.get(&fingerprint))
            } else {
                None
            }
        };
        if let Some(cached) = short_circuit {
            info!(fingerprint = %fingerprint, "Circuit breaker open, provider call skipped");
            return Ok(self.degrade(
                survey,
                fingerprint,
                cached,
                "circuit breaker open".to_string(),
            ));
        }

        let prompt = build_prompt(&survey)?;
        let raw = match self.call_provider(&prompt).await {
            Ok(raw) => raw,
            Err(err) if err.is_retryable() => {
                let cached = {
                    let mut state = self.state.lock();
                    let now = self.clock.now();
                    if state.breaker.record_failure(now) {
                        warn!(
                            consecutive_failures = state.breaker.consecutive_failures(),
                            "Circuit breaker opened"
                        );
                    }
                    state.cache.get(&fingerprint)
                };
                warn!(fingerprint = %fingerprint, error = %err, "Provider unavailable, degrading");
                return Ok(self.degrade(survey, fingerprint, cached, err.to_string()));
            }
            Err(err) => {
                warn!(fingerprint = %fingerprint, error = %err, "Provider call failed");
                return Err(err);
            }
        };

        let plan = extract_plan(&raw).map_err(|err| {
            warn!(fingerprint = %fingerprint, error = %err, "Provider output rejected");
            err
        })?;
        let plan = ensure_report(plan, &survey);

        {
            let mut state = self.state.lock();
            state.breaker.record_success();
            state.cache.put(fingerprint.clone(), &plan);
        }

        info!(fingerprint = %fingerprint, "Plan generated by provider");
        self.persist(survey, &plan, PlanSource::Provider, None);
        Ok(PlanResponse {
            plan,
            source: PlanSource::Provider,
            fingerprint,
        })
    }

    pub fn breaker_snapshot(&self) -> BreakerSnapshot {
        self.state.lock().breaker.snapshot(self.clock.now())
    }

    pub fn cache_len(&self) -> usize {
        self.state.lock().cache.len()
    }

    pub fn cached_plan(&self, fingerprint: &Fingerprint) -> Option<Plan> {
        self.state.lock().cache.get(fingerprint)
    }

    async fn call_provider(&self, prompt: &str) -> Result<String, PlanError> {
        match tokio::time::timeout(self.call_timeout, self.client.generate(prompt)).await {
            Ok(result) => result,
            Err(_) => Err(PlanError::TransportTimeout(format!(
                "{} request exceeded {} second deadline",
                self.client.provider_name(),
                self.call_timeout.as_secs()
            ))),
        }
    }

    /// Serve a cached plan, or a fallback when nothing is cached.
    fn degrade(
        &self,
        survey: Survey,
        fingerprint: Fingerprint,
        cached: Option<Plan>,
        reason: String,
    ) -> PlanResponse {
        let (plan, source) = match cached {
            Some(plan) => {
                debug!(fingerprint = %fingerprint, "Serving cached plan");
                (plan, PlanSource::Cache)
            }
            None => {
                debug!(fingerprint = %fingerprint, "No cached plan, synthesizing fallback");
                (synthesize(&survey), PlanSource::Fallback)
            }
        };
        let plan = ensure_report(plan, &survey);
        info!(fingerprint = %fingerprint, source = %source, reason = %reason, "Serving degraded plan");
        self.persist(survey, &plan, source, Some(reason));
        PlanResponse {
            plan,
            source,
            fingerprint,
        }
    }

    /// Hand the outcome to the record sink without waiting on it.
    fn persist(&self, survey: Survey, plan: &Plan, source: PlanSource, reason: Option<String>) {
        let result = match serde_json::to_string(plan) {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "Failed to serialize plan record");
                return;
            }
        };
        let record = PlanRecord::new(RECORD_TASK, survey, result, source, reason);
        let sink = Arc::clone(&self.sink);
        let save = move || {
            if let Err(e) = sink.save(&record) {
                warn!(error = %e, "Failed to save plan record");
            }
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn_blocking(save);
            }
            Err(_) => save(),
        }
    }
}
