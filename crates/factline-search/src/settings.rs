//! Search client settings (the `[search]` config table)

use crate::{ExaClient, SearchError, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

/// Web-search client settings
///
/// The API key is read from the environment variable named by `api_key_env`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// API base URL; Exa's public endpoint when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Environment variable holding the API key
    pub api_key_env: String,

    /// Per-request timeout (seconds)
    pub timeout_secs: u64,

    /// Retries after the first attempt
    pub max_retries: u32,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key_env: "EXA_API_KEY".to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl SearchSettings {
    /// Validate the settings
    pub fn validate(&self) -> Result<(), String> {
        if self.api_key_env.trim().is_empty() {
            return Err("search.api_key_env must name an environment variable".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("search.timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Construct the Exa client, reading the API key from the environment
    pub fn build(&self) -> Result<ExaClient, SearchError> {
        self.validate().map_err(SearchError::Config)?;
        let key = std::env::var(&self.api_key_env).map_err(|_| {
            SearchError::Config(format!("environment variable {} is not set", self.api_key_env))
        })?;
        let endpoint = self
            .endpoint
            .as_deref()
            .unwrap_or(crate::exa::DEFAULT_ENDPOINT);
        let client = ExaClient::new(endpoint, key)?
            .with_timeout(Duration::from_secs(self.timeout_secs))?
            .with_max_retries(self.max_retries);
        info!(endpoint, "Search client ready");
        Ok(client)
    }
}
