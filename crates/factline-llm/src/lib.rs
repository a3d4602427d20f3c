//! Factline LLM Provider Layer
//!
//! Implementations of the `TextGenerator` trait from `factline-domain`.
//! Every provider takes a prompt plus a named JSON Schema and returns the raw
//! JSON text produced by the model; validation is left to the caller.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic, scriptable mock for testing
//! - `OpenAiProvider`: OpenAI-compatible chat completions with `json_schema` output
//! - `OllamaProvider`: Local Ollama API with schema-constrained `format`
//! - `ConfiguredProvider`: One of the HTTP providers, chosen by [`LlmSettings`]
//!
//! # Examples
//!
//! ```
//! use factline_llm::MockProvider;
//! use factline_domain::traits::TextGenerator;
//! use factline_domain::StructuredSchema;
//!
//! # async fn example() {
//! let provider = MockProvider::new(r#"{"claims": []}"#);
//! let schema = StructuredSchema::new("claims", serde_json::json!({"type": "object"}));
//! let result = provider.generate_structured("test prompt", &schema).await.unwrap();
//! assert_eq!(result, r#"{"claims": []}"#);
//! # }
//! ```

#![warn(missing_docs)]

pub mod mock;
pub mod ollama;
pub mod openai;
pub mod settings;

use std::time::Duration;
use thiserror::Error;

pub use mock::MockProvider;
pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;
pub use settings::{ConfiguredProvider, LlmSettings, ProviderKind};

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// The model declined to answer
    #[error("Model refused the request: {0}")]
    Refused(String),

    /// The request did not complete in time
    #[error("Request timed out")]
    Timeout,

    /// Provider misconfiguration (missing key, bad endpoint)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

impl LlmError {
    /// Whether another attempt could succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            LlmError::Communication(_) | LlmError::RateLimitExceeded | LlmError::Timeout
        )
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::Communication(format!("Request failed: {}", e))
        }
    }
}

/// Default timeout for LLM requests (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default number of retries after the first attempt
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Exponential backoff before the next attempt: 1s, 2s, 4s, etc.
pub(crate) fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_secs(2u64.pow(attempt.saturating_sub(1).min(6)))
}

/// Whether failed attempt number `attempt` (1-based) may be followed by a retry
pub(crate) fn should_retry(attempt: u32, max_retries: u32) -> bool {
    attempt <= max_retries
}

/// Build the shared reqwest client used by the HTTP providers
pub(crate) fn http_client(timeout: Duration) -> Result<reqwest::Client, LlmError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| LlmError::Config(format!("Failed to build HTTP client: {}", e)))
}
