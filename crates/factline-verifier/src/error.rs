//! Error types for the Verifier

use factline_domain::SchemaViolation;
use thiserror::Error;

/// Errors from verifying one claim
///
/// These never cross claim boundaries; the pipeline turns them into a degraded verdict.
#[derive(Error, Debug)]
pub enum VerifierError {
    /// Text-generation service error
    #[error("Generation error: {0}")]
    Generation(String),

    /// Verification timeout
    #[error("Verification timeout")]
    Timeout,

    /// Generated output did not match the verification schema
    #[error("Output does not match the verification schema:\n{}", SchemaViolation::describe_all(.0))]
    Schema(Vec<SchemaViolation>),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
