//! Error types for the homeplan orchestration layer.

use thiserror::Error;

/// Storage-related errors (record sinks)
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Record store error: {0}")]
    Store(#[from] sled::Error),

    #[error("Record encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("Storage I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// How a failure should be treated by the orchestrator and reported by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Provider timed out or signalled overload. Absorbed by cache/fallback.
    TransportRetryable,
    /// Any other provider transport failure. Surfaced immediately.
    TransportFatal,
    /// Provider answered, but the text could not be turned into a plan.
    Content,
    /// Anything unanticipated, including configuration and storage faults.
    Internal,
}

/// Errors produced while generating a plan.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Provider request timed out: {0}")]
    TransportTimeout(String),

    #[error("Provider unavailable: {0}")]
    TransportUnavailable(String),

    #[error("Provider transport error: {0}")]
    TransportError(String),

    #[error("Could not locate JSON object in provider output: {message} | preview={preview}")]
    ExtractionError { message: String, preview: String },

    #[error("Provider returned invalid JSON: {message} | preview={preview}")]
    ParseError { message: String, preview: String },

    #[error("Provider JSON schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PlanError {
    pub fn class(&self) -> FailureClass {
        match self {
            PlanError::TransportTimeout(_) | PlanError::TransportUnavailable(_) => {
                FailureClass::TransportRetryable
            }
            PlanError::TransportError(_) => FailureClass::TransportFatal,
            PlanError::ExtractionError { .. }
            | PlanError::ParseError { .. }
            | PlanError::SchemaMismatch(_) => FailureClass::Content,
            PlanError::Config(_) | PlanError::Storage(_) | PlanError::Internal(_) => {
                FailureClass::Internal
            }
        }
    }

    /// True only for failures that count against the circuit breaker.
    pub fn is_retryable(&self) -> bool {
        self.class() == FailureClass::TransportRetryable
    }

    /// Message safe to show outside the process. Internal faults never leak detail.
    pub fn public_message(&self) -> String {
        match self.class() {
            FailureClass::Internal => "Internal Server Error".to_string(),
            _ => self.to_string(),
        }
    }
}

impl From<config::ConfigError> for PlanError {
    fn from(err: config::ConfigError) -> Self {
        PlanError::Config(err.to_string())
    }
}
