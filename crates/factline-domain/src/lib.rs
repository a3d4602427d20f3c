//! Factline Domain Layer
//!
//! Core data model and service boundaries for the claim verification pipeline.
//! Every other crate in the workspace depends on the types defined here.
//!
//! ## Key Concepts
//!
//! - **Claim**: A verifiable assertion anchored to an exact span of the source text
//! - **Source**: One entry of a claim's evidence set, as returned by web search
//! - **MergedSource**: A source joined with the verifier's stance and scores
//! - **Score**: An integer on the 0-100 scale (confidence, agreement, pertinence)
//! - **Citation marker**: An inline `{{n}}` token referencing a source by its local rank
//!
//! ## Architecture
//!
//! External capabilities (text generation, web search, submission lookup) are
//! expressed as traits in [`traits`]. Implementations live in other crates and
//! are passed explicitly into each pipeline stage.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod citation;
pub mod claim;
pub mod schema;
pub mod score;
pub mod source;
pub mod traits;

// Re-exports for convenience
pub use citation::{CitationToken, CitationTokens};
pub use claim::{Claim, ClaimId, ClaimStatus, ExtractedClaim};
pub use schema::{SchemaViolation, StructuredSchema};
pub use score::Score;
pub use source::{MergedSource, SearchHit, Source, Stance};
