//! Factline Pipeline
//!
//! Wires extraction, retrieval and verification into the five-stage claim
//! checking pipeline.
//!
//! # Architecture
//!
//! ```text
//! Text → Extractor → Claim[] ─┬─ EvidenceRetriever → ClaimVerifier → assemble ─┬→ Claim[]
//!                             ├─ ...                                          ─┤
//!                             └─ ...                                          ─┘
//! ```
//!
//! Stages 1 and 2 run once per submission and fail as a whole. Stages 3 to 5
//! run per claim, with bounded concurrency; each claim's failures stay local to
//! that claim and the output keeps the input order.
//!
//! # Example Usage
//!
//! ```no_run
//! use factline_pipeline::{FactChecker, PipelineConfig};
//! use factline_llm::MockProvider;
//! use factline_search::MockSearch;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let checker = FactChecker::new(
//!     Arc::new(MockProvider::default()),
//!     Arc::new(MockSearch::default()),
//!     PipelineConfig::default(),
//! )?;
//!
//! let report = checker.check_text("The Eiffel Tower is 330 meters tall.").await?;
//! for claim in &report.claims {
//!     println!("{} {} {:?}", claim.id, claim.status, claim.confidence);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod checker;
pub mod config;
mod error;
pub mod retriever;
mod store;
mod summary;

pub use checker::{ClaimFailure, FactChecker, VerificationReport};
pub use config::{PipelineConfig, RetrieverConfig, SearchInput};
pub use error::{ConfigError, ErrorKind, PipelineError, RetrievalError, Stage};
pub use retriever::EvidenceRetriever;
pub use store::{InMemorySubmissionStore, DEFAULT_SUBMISSION_CAPACITY};
pub use summary::PipelineSummary;
