//! Error types for the pipeline

use factline_extractor::ExtractorError;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Pipeline stage named in errors and failure reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Claim extraction and position resolution
    Extraction,
    /// Evidence retrieval
    Retrieval,
    /// Claim verification
    Verification,
    /// Submission lookup
    Submission,
}

impl Stage {
    /// Lowercase stage name
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Extraction => "extraction",
            Stage::Retrieval => "retrieval",
            Stage::Verification => "verification",
            Stage::Submission => "submission",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Broad cause of a pipeline error, used by transports to pick a status code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller's input was rejected
    InvalidInput,
    /// The requested submission does not exist
    NotFound,
    /// An external service failed or returned unusable output
    Service,
}

/// A whole-request failure: which stage failed and why
#[derive(Error, Debug, Clone)]
#[error("{stage} failed: {cause}")]
pub struct PipelineError {
    /// Failing stage
    pub stage: Stage,

    /// Broad cause
    pub kind: ErrorKind,

    /// Underlying cause
    pub cause: String,
}

impl PipelineError {
    /// Create an error
    pub fn new(stage: Stage, kind: ErrorKind, cause: impl Into<String>) -> Self {
        Self {
            stage,
            kind,
            cause: cause.into(),
        }
    }
}

impl From<ExtractorError> for PipelineError {
    fn from(e: ExtractorError) -> Self {
        let kind = match e {
            ExtractorError::EmptyText | ExtractorError::TextTooLong(..) => ErrorKind::InvalidInput,
            _ => ErrorKind::Service,
        };
        Self::new(Stage::Extraction, kind, e.to_string())
    }
}

/// Errors from retrieving one claim's evidence
#[derive(Error, Debug)]
pub enum RetrievalError {
    /// Search service error
    #[error("Search error: {0}")]
    Search(String),

    /// Search timeout
    #[error("Search timeout")]
    Timeout,
}

/// Invalid pipeline configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid configuration: {0}")]
pub struct ConfigError(pub String);
