//! Error types for the Extractor

use factline_domain::SchemaViolation;
use thiserror::Error;

/// Errors that end an extraction call
///
/// Extraction is all-or-nothing: any of these fails the whole submission.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Input text is empty or whitespace
    #[error("Text is empty")]
    EmptyText,

    /// Text exceeds maximum length
    #[error("Text too long: {0} chars (max: {1})")]
    TextTooLong(usize, usize),

    /// Text-generation service error
    #[error("Generation error: {0}")]
    Generation(String),

    /// Extraction timeout
    #[error("Extraction timeout")]
    Timeout,

    /// Generated output did not match the extraction schema
    #[error("Output does not match the extraction schema:\n{}", SchemaViolation::describe_all(.0))]
    Schema(Vec<SchemaViolation>),

    /// Every extracted claim had an anchor that is not in the text
    #[error("None of the {0} extracted claims could be located in the text")]
    NoAnchoredClaims(usize),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_lists_violations() {
        let err = ExtractorError::Schema(vec![
            SchemaViolation::new("claims[0].exactText", "non-empty string", "empty string"),
            SchemaViolation::new("claims[1]", "object", "number"),
        ]);
        let message = err.to_string();
        assert!(message.contains("claims[0].exactText: expected non-empty string"));
        assert!(message.contains("claims[1]: expected object, got number"));
    }
}
