//! Configuration file parsing for the server.
//!
//! Loads the bind address plus the `[pipeline]`, `[llm]` and `[search]`
//! tables from a TOML file. API keys are read from the environment.

use factline_llm::LlmSettings;
use factline_pipeline::{PipelineConfig, DEFAULT_SUBMISSION_CAPACITY};
use factline_search::SearchSettings;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A value failed validation
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Server configuration loaded from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Bind port (e.g., 8080)
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,

    /// Submissions kept in memory before the oldest are evicted
    #[serde(default = "default_max_submissions")]
    pub max_submissions: usize,

    /// Pipeline stage settings
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Text-generation provider
    #[serde(default)]
    pub llm: LlmSettings,

    /// Web-search client
    #[serde(default)]
    pub search: SearchSettings,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_bind_port() -> u16 {
    8080
}

fn default_max_submissions() -> usize {
    DEFAULT_SUBMISSION_CAPACITY
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            bind_port: default_bind_port(),
            max_submissions: default_max_submissions(),
            pipeline: PipelineConfig::default(),
            llm: LlmSettings::default(),
            search: SearchSettings::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: ServerConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bind_address.trim().is_empty() {
            return Err(ConfigError::Invalid("bind_address must not be empty".to_string()));
        }
        if self.max_submissions == 0 {
            return Err(ConfigError::Invalid("max_submissions must be greater than 0".to_string()));
        }
        self.pipeline
            .validate()
            .map_err(|e| ConfigError::Invalid(e.0))?;
        self.llm.validate().map_err(ConfigError::Invalid)?;
        self.search.validate().map_err(ConfigError::Invalid)?;
        Ok(())
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}
