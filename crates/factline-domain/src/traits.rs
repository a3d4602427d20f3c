//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the pipeline and the services it
//! consumes. Implementations live in other crates and are constructed by the
//! caller, then handed to each stage explicitly.

use crate::{SearchHit, StructuredSchema};
use async_trait::async_trait;

/// Text-generation service
///
/// Implemented by the infrastructure layer (factline-llm)
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Error type for generation calls
    type Error: std::error::Error + Send + Sync + 'static;

    /// Generate output constrained by `schema`, returning the raw JSON text
    ///
    /// Callers must validate the returned text against the schema before use.
    async fn generate_structured(
        &self,
        prompt: &str,
        schema: &StructuredSchema,
    ) -> Result<String, Self::Error>;

    /// Name of the model behind this generator, for logs and reports
    fn model_name(&self) -> &str;
}

/// Web-search service
///
/// Implemented by the infrastructure layer (factline-search)
#[async_trait]
pub trait WebSearch: Send + Sync {
    /// Error type for search calls
    type Error: std::error::Error + Send + Sync + 'static;

    /// Return up to `num_results` documents ranked by the service's own relevance
    async fn search(&self, query: &str, num_results: usize) -> Result<Vec<SearchHit>, Self::Error>;
}

/// A stored submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Submission identifier
    pub id: String,

    /// Raw submitted text
    pub content: String,
}

/// Read access to stored submissions
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Error type for store operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// Get a submission by id
    async fn get_submission(&self, id: &str) -> Result<Option<Submission>, Self::Error>;
}
