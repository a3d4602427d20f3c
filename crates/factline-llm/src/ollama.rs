//! Ollama Provider Implementation
//!
//! Provides integration with Ollama's local LLM API. The JSON Schema is passed
//! as the `format` parameter, which constrains decoding to conforming output.
//!
//! # Features
//!
//! - Async HTTP communication with Ollama API
//! - Configurable endpoint and model
//! - Retry logic with exponential backoff
//! - Timeout handling
//!
//! # Examples
//!
//! ```no_run
//! use factline_llm::OllamaProvider;
//!
//! let provider = OllamaProvider::new("http://localhost:11434", "llama3.1").unwrap();
//! ```

use crate::{backoff_delay, http_client, should_retry, LlmError, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS};
use async_trait::async_trait;
use factline_domain::traits::TextGenerator;
use factline_domain::StructuredSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Ollama API provider for local LLM inference
pub struct OllamaProvider {
    endpoint: String,
    model: String,
    client: reqwest::Client,
    max_retries: u32,
}

/// Request body for Ollama generate API
#[derive(Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    format: &'a Value,
}

/// Response from Ollama generate API
#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
}

impl OllamaProvider {
    /// Create a new Ollama provider
    ///
    /// # Parameters
    ///
    /// - `endpoint`: Ollama API endpoint (e.g., "http://localhost:11434")
    /// - `model`: Model to use (e.g., "llama3.1", "mistral")
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            client: http_client(Duration::from_secs(DEFAULT_TIMEOUT_SECS))?,
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    /// Create a new Ollama provider on the default local endpoint
    pub fn default_endpoint(model: impl Into<String>) -> Result<Self, LlmError> {
        Self::new(DEFAULT_ENDPOINT, model)
    }

    /// Set the number of retries after the first attempt
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, LlmError> {
        self.client = http_client(timeout)?;
        Ok(self)
    }

    async fn attempt(&self, body: &OllamaGenerateRequest<'_>) -> Result<String, LlmError> {
        let url = format!("{}/api/generate", self.endpoint);
        let response = self.client.post(&url).json(body).send().await?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<OllamaGenerateResponse>()
                .await
                .map(|r| r.response)
                .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)));
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LlmError::ModelNotAvailable(self.model.clone()));
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(LlmError::Communication(format!("HTTP {}: {}", status, error_text)))
    }
}

#[async_trait]
impl TextGenerator for OllamaProvider {
    type Error = LlmError;

    async fn generate_structured(
        &self,
        prompt: &str,
        schema: &StructuredSchema,
    ) -> Result<String, Self::Error> {
        let body = OllamaGenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            format: &schema.schema,
        };

        let mut attempts = 0;
        loop {
            attempts += 1;
            match self.attempt(&body).await {
                Ok(text) => {
                    debug!(model = %self.model, attempts, chars = text.len(), "Generation complete");
                    return Ok(text);
                }
                Err(e) if e.is_retryable() && should_retry(attempts, self.max_retries) => {
                    let delay = backoff_delay(attempts);
                    warn!(model = %self.model, attempt = attempts, error = %e, ?delay, "Generation failed, retrying");
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
