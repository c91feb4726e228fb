//! homeplan: Home Purchase Plan Generation
//!
//! Turns a survey of a household's finances into a structured home purchase
//! plan. Plans come from a text generation provider when it is healthy, from a
//! per-survey cache when it is not, and from a deterministic fallback when
//! nothing is cached. Every plan carries a rendered report.

pub mod breaker;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod fallback;
pub mod fingerprint;
pub mod logging;
pub mod orchestrator;
pub mod plan;
pub mod provider;
pub mod report;
pub mod sink;
pub mod types;

pub use error::{FailureClass, PlanError, StorageError};
pub use orchestrator::{PlanOrchestrator, PlanResponse};
pub use plan::{Plan, PlanSource};
pub use provider::TextGenerationClient;
pub use types::{Fingerprint, Survey};
