//! Pipeline configuration
//!
//! Loaded from TOML with one table per stage:
//!
//! ```toml
//! max_concurrent_claims = 8
//!
//! [extractor]
//! max_claims = 5
//! anchor_policy = "last-occurrence"
//!
//! [retriever]
//! results_per_claim = 3
//! search_input = "search-query"
//!
//! [verifier]
//! verification_timeout_secs = 60
//! ```

use crate::error::ConfigError;
use factline_extractor::ExtractorConfig;
use factline_verifier::VerifierConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Which claim field is sent to the search service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchInput {
    /// The extracted search question
    #[default]
    SearchQuery,
    /// The self-contained claim text
    ClaimText,
}

/// Configuration for evidence retrieval
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrieverConfig {
    /// Sources requested per claim (K)
    pub results_per_claim: usize,

    /// Excerpt length kept from each source (characters)
    pub excerpt_chars: usize,

    /// Field used as the search input
    pub search_input: SearchInput,

    /// Maximum time for one search call (seconds)
    pub search_timeout_secs: u64,
}

impl RetrieverConfig {
    /// Get the search timeout as a Duration
    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.results_per_claim == 0 {
            return Err("results_per_claim must be greater than 0".to_string());
        }
        if self.excerpt_chars == 0 {
            return Err("excerpt_chars must be greater than 0".to_string());
        }
        if self.search_timeout_secs == 0 {
            return Err("search_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self {
            results_per_claim: 3,
            excerpt_chars: 300,
            search_input: SearchInput::SearchQuery,
            search_timeout_secs: 30,
        }
    }
}

/// Configuration for the whole pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Claims searched and verified at the same time
    pub max_concurrent_claims: usize,

    /// Extraction and position resolution
    pub extractor: ExtractorConfig,

    /// Evidence retrieval
    pub retriever: RetrieverConfig,

    /// Verification
    pub verifier: VerifierConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_concurrent_claims: 8,
            extractor: ExtractorConfig::default(),
            retriever: RetrieverConfig::default(),
            verifier: VerifierConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Economy preset: fewer claims and sources, lower concurrency
    pub fn economy() -> Self {
        Self {
            max_concurrent_claims: 2,
            extractor: ExtractorConfig {
                max_claims: 3,
                ..ExtractorConfig::default()
            },
            retriever: RetrieverConfig {
                results_per_claim: 2,
                ..RetrieverConfig::default()
            },
            verifier: VerifierConfig::default(),
        }
    }

    /// Validate every stage's configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_concurrent_claims == 0 {
            return Err(ConfigError("max_concurrent_claims must be greater than 0".to_string()));
        }
        self.extractor
            .validate()
            .map_err(|e| ConfigError(format!("extractor: {}", e)))?;
        self.retriever
            .validate()
            .map_err(|e| ConfigError(format!("retriever: {}", e)))?;
        self.verifier
            .validate()
            .map_err(|e| ConfigError(format!("verifier: {}", e)))?;
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| ConfigError(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError(format!("Failed to serialize to TOML: {}", e)))
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_toml(&contents)
    }
}
