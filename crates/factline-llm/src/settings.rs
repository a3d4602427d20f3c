//! Provider selection from configuration
//!
//! `LlmSettings` is the `[llm]` table shared by the server and CLI config
//! files. API keys are never stored in the file; `api_key_env` names the
//! environment variable to read at startup.

use crate::{LlmError, OllamaProvider, OpenAiProvider, DEFAULT_MAX_RETRIES};
use async_trait::async_trait;
use factline_domain::traits::TextGenerator;
use factline_domain::StructuredSchema;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

/// Which HTTP provider to construct
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// OpenAI-compatible chat completions
    #[default]
    OpenAi,
    /// Local Ollama server
    Ollama,
}

/// Text-generation provider settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// Provider kind
    pub provider: ProviderKind,

    /// API base URL; the provider's default when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Model name
    pub model: String,

    /// Environment variable holding the API key (OpenAI only)
    pub api_key_env: String,

    /// Per-request timeout (seconds)
    pub timeout_secs: u64,

    /// Retries after the first attempt
    pub max_retries: u32,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: ProviderKind::OpenAi,
            endpoint: None,
            model: "gpt-4o".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_secs: 30,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl LlmSettings {
    /// Validate the settings
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("llm.model must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("llm.timeout_secs must be greater than 0".to_string());
        }
        if self.provider == ProviderKind::OpenAi && self.api_key_env.trim().is_empty() {
            return Err("llm.api_key_env must name an environment variable".to_string());
        }
        Ok(())
    }

    /// Construct the configured provider, reading the API key from the environment
    pub fn build(&self) -> Result<ConfiguredProvider, LlmError> {
        self.validate().map_err(LlmError::Config)?;
        let timeout = Duration::from_secs(self.timeout_secs);

        let provider = match self.provider {
            ProviderKind::OpenAi => {
                let key = std::env::var(&self.api_key_env).map_err(|_| {
                    LlmError::Config(format!(
                        "environment variable {} is not set",
                        self.api_key_env
                    ))
                })?;
                let endpoint = self
                    .endpoint
                    .as_deref()
                    .unwrap_or(crate::openai::DEFAULT_ENDPOINT);
                ConfiguredProvider::OpenAi(
                    OpenAiProvider::new(endpoint, &self.model, key)?
                        .with_timeout(timeout)?
                        .with_max_retries(self.max_retries),
                )
            }
            ProviderKind::Ollama => {
                let endpoint = self
                    .endpoint
                    .as_deref()
                    .unwrap_or(crate::ollama::DEFAULT_ENDPOINT);
                ConfiguredProvider::Ollama(
                    OllamaProvider::new(endpoint, &self.model)?
                        .with_timeout(timeout)?
                        .with_max_retries(self.max_retries),
                )
            }
        };

        info!(provider = ?self.provider, model = %self.model, "Text-generation provider ready");
        Ok(provider)
    }
}

/// A provider chosen at runtime from [`LlmSettings`]
pub enum ConfiguredProvider {
    /// OpenAI-compatible provider
    OpenAi(OpenAiProvider),
    /// Ollama provider
    Ollama(OllamaProvider),
}

#[async_trait]
impl TextGenerator for ConfiguredProvider {
    type Error = LlmError;

    async fn generate_structured(
        &self,
        prompt: &str,
        schema: &StructuredSchema,
    ) -> Result<String, Self::Error> {
        match self {
            ConfiguredProvider::OpenAi(p) => p.generate_structured(prompt, schema).await,
            ConfiguredProvider::Ollama(p) => p.generate_structured(prompt, schema).await,
        }
    }

    fn model_name(&self) -> &str {
        match self {
            ConfiguredProvider::OpenAi(p) => p.model_name(),
            ConfiguredProvider::Ollama(p) => p.model_name(),
        }
    }
}
