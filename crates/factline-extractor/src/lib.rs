//! Factline Extractor
//!
//! Turns unstructured text into positioned claims.
//!
//! # Architecture
//!
//! ```text
//! Text → Extractor → TextGenerator → {claim, exactText, searchQuery}[] → PositionResolver → Claim[]
//! ```
//!
//! # Key Features
//!
//! - **Schema-constrained extraction**: one generation call per submission with a strict JSON Schema
//! - **Strict parsing**: malformed output fails the call with field-level diagnostics
//! - **Anchoring**: every surviving claim satisfies `text[start..end] == exact_text`
//! - **Cost control**: duplicates are dropped and the claim count is capped
//!
//! # Example Usage
//!
//! ```no_run
//! use factline_extractor::{Extractor, ExtractorConfig};
//! use factline_llm::MockProvider;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = MockProvider::new(r#"{"claims": []}"#);
//! let extractor = Extractor::new(Arc::new(llm), ExtractorConfig::default())?;
//!
//! let result = extractor.extract("The Eiffel Tower is 330 meters tall.").await?;
//! for claim in &result.claims {
//!     println!("{} [{}..{}] {}", claim.id, claim.start, claim.end, claim.claim_text);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod parser;
mod prompt;
pub mod resolver;
pub mod schema;
mod types;

pub use config::{AnchorPolicy, ExtractorConfig};
pub use error::ExtractorError;
pub use extractor::Extractor;
pub use parser::parse_extraction_response;
pub use resolver::{PositionResolver, Resolution};
pub use types::{ExtractionFailure, ExtractionMetadata, ExtractionResult, FailureReason};
