//! OpenAI-compatible Provider Implementation
//!
//! Talks to any endpoint implementing the `/v1/chat/completions` API with
//! structured outputs (`response_format = json_schema`). The schema is sent in
//! strict mode, so the returned `content` is JSON conforming to it unless the
//! model refuses.
//!
//! # Examples
//!
//! ```no_run
//! use factline_llm::OpenAiProvider;
//!
//! let provider = OpenAiProvider::new("https://api.openai.com", "gpt-4o", "sk-...")
//!     .unwrap()
//!     .with_max_retries(5);
//! ```

use crate::{backoff_delay, http_client, should_retry, LlmError, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS};
use async_trait::async_trait;
use factline_domain::traits::TextGenerator;
use factline_domain::StructuredSchema;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Default OpenAI API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com";

/// OpenAI-compatible chat completions provider
pub struct OpenAiProvider {
    endpoint: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
    max_retries: u32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    response_format: ResponseFormat<'a>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    json_schema: JsonSchemaFormat<'a>,
}

#[derive(Serialize)]
struct JsonSchemaFormat<'a> {
    name: &'a str,
    strict: bool,
    schema: &'a Value,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Deserialize)]
struct AssistantMessage {
    content: Option<String>,
    #[serde(default)]
    refusal: Option<String>,
}

impl OpenAiProvider {
    /// Create a new provider
    ///
    /// # Parameters
    ///
    /// - `endpoint`: API base URL without the `/v1` suffix
    /// - `model`: Model to use (e.g., "gpt-4o")
    /// - `api_key`: Bearer token
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(LlmError::Config("OpenAI API key is empty".to_string()));
        }
        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key,
            client: http_client(Duration::from_secs(DEFAULT_TIMEOUT_SECS))?,
            max_retries: DEFAULT_MAX_RETRIES,
        })
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

    fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.endpoint)
    }

    async fn attempt(&self, body: &ChatRequest<'_>) -> Result<String, LlmError> {
        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let parsed = response
                .json::<ChatResponse>()
                .await
                .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;
            return extract_content(parsed);
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(match status {
            StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimitExceeded,
            StatusCode::NOT_FOUND => LlmError::ModelNotAvailable(self.model.clone()),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                LlmError::Config(format!("HTTP {}: {}", status, error_text))
            }
            s if s.is_server_error() => {
                LlmError::Communication(format!("HTTP {}: {}", status, error_text))
            }
            _ => LlmError::InvalidResponse(format!("HTTP {}: {}", status, error_text)),
        })
    }
}

fn extract_content(response: ChatResponse) -> Result<String, LlmError> {
    let message = response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message)
        .ok_or_else(|| LlmError::InvalidResponse("Response has no choices".to_string()))?;

    if let Some(refusal) = message.refusal.filter(|r| !r.is_empty()) {
        return Err(LlmError::Refused(refusal));
    }
    message
        .content
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| LlmError::InvalidResponse("Response message has no content".to_string()))
}

#[async_trait]
impl TextGenerator for OpenAiProvider {
    type Error = LlmError;

    async fn generate_structured(
        &self,
        prompt: &str,
        schema: &StructuredSchema,
    ) -> Result<String, Self::Error> {
        let body = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            response_format: ResponseFormat {
                kind: "json_schema",
                json_schema: JsonSchemaFormat {
                    name: &schema.name,
                    strict: true,
                    schema: &schema.schema,
                },
            },
        };

        let mut attempts = 0;
        loop {
            attempts += 1;
            match self.attempt(&body).await {
                Ok(content) => {
                    debug!(model = %self.model, attempts, chars = content.len(), "Generation complete");
                    return Ok(content);
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
