//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The pipeline failed as a whole
    #[error("{0}")]
    Pipeline(#[from] factline_pipeline::PipelineError),

    /// Text-generation provider could not be constructed
    #[error("Text-generation provider error: {0}")]
    Llm(#[from] factline_llm::LlmError),

    /// Search client could not be constructed
    #[error("Search client error: {0}")]
    Search(#[from] factline_search::SearchError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<factline_pipeline::ConfigError> for CliError {
    fn from(e: factline_pipeline::ConfigError) -> Self {
        CliError::Config(e.0)
    }
}
