//! Gemini generateContent client

use crate::error::PlanError;
use crate::extract::preview;
use crate::provider::{ProviderConfig, TextGenerationClient};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;

pub struct GeminiClient {
    client: Client,
    url: String,
    api_key: String,
    timeout: Duration,
}

impl GeminiClient {
    pub fn new(config: &ProviderConfig) -> Result<Self, PlanError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                PlanError::Config("GEMINI_API_KEY is not set in environment variables.".to_string())
            })?;
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(timeout)
            .build()
            .map_err(|e| PlanError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: config.url.clone(),
            api_key,
            timeout,
        })
    }

    fn map_http_error(&self, error: reqwest::Error) -> PlanError {
        let error = error.without_url();
        if error.is_timeout() {
            PlanError::TransportTimeout(format!(
                "Gemini request timed out after {} seconds",
                self.timeout.as_secs()
            ))
        } else if error.is_connect() {
            PlanError::TransportError(format!("Gemini connection error: {}", error))
        } else {
            PlanError::TransportError(format!("Gemini network error: {}", error))
        }
    }
}

/// Classify a non-success HTTP status.
pub fn classify_status(status: StatusCode, body: &str) -> PlanError {
    let message = format!("Gemini HTTP {}: {}", status.as_u16(), preview(body));
    match status {
        StatusCode::TOO_MANY_REQUESTS | StatusCode::SERVICE_UNAVAILABLE => {
            PlanError::TransportUnavailable(message)
        }
        _ => PlanError::TransportError(message),
    }
}

/// Pull the generated text out of a generateContent response body.
pub fn response_text(data: &Value) -> Result<String, PlanError> {
    let has_candidates = data
        .get("candidates")
        .and_then(Value::as_array)
        .map(|c| !c.is_empty())
        .unwrap_or(false);
    if !has_candidates {
        return Err(PlanError::TransportError(format!(
            "Gemini invalid response: {}",
            preview(&data.to_string())
        )));
    }

    data.pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            PlanError::TransportError(format!(
                "Gemini invalid shape: {}",
                preview(&data.to_string())
            ))
        })
}

#[async_trait]
impl TextGenerationClient for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, PlanError> {
        let payload = json!({"contents": [{"parts": [{"text": prompt}]}]});

        let response = self
            .client
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| self.map_http_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(classify_status(status, &body));
        }

        let data: Value = response.json().await.map_err(|e| {
            if e.is_timeout() {
                self.map_http_error(e)
            } else {
                PlanError::TransportError(format!("Gemini response was not JSON: {}", e))
            }
        })?;

        response_text(&data)
    }

    fn provider_name(&self) -> &str {
        "gemini"
    }
}
