//! Text Generation Provider
//!
//! The orchestrator only needs one capability from a provider: turn prompt
//! text into response text. Implementations own the classification of
//! transport failures into timeout / unavailable / other.

use crate::error::PlanError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod gemini;
pub mod prompt;

pub use gemini::GeminiClient;
pub use prompt::build_prompt;

pub const DEFAULT_GEMINI_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent";

/// Text generation client trait
#[async_trait]
pub trait TextGenerationClient: Send + Sync {
    /// Generate response text for a prompt.
    ///
    /// Errors must be one of `TransportTimeout`, `TransportUnavailable`, or
    /// `TransportError`.
    async fn generate(&self, prompt: &str) -> Result<String, PlanError>;

    /// Get the provider name
    fn provider_name(&self) -> &str;
}

/// Provider connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Full generateContent endpoint URL
    #[serde(default = "default_url")]
    pub url: String,

    /// API key; falls back to GEMINI_API_KEY when unset
    #[serde(default)]
    pub api_key: Option<String>,

    /// Deadline for one provider call, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// TCP connect timeout, in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_url() -> String {
    DEFAULT_GEMINI_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    300
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl ProviderConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(format!("Invalid provider url: {}", self.url));
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be at least 1".to_string());
        }
        if let Some(key) = &self.api_key {
            if key.trim().is_empty() {
                return Err("api_key is set but empty".to_string());
            }
        }
        Ok(())
    }
}
