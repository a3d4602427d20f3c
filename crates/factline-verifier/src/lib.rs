//! Factline Verifier
//!
//! Judges one claim against its evidence set and merges the verdict back into
//! the claim.
//!
//! # Architecture
//!
//! ```text
//! (claim, Source[]) → ClaimVerifier → TextGenerator → VerificationResult → assemble → Claim
//! ```
//!
//! The verdict is validated field by field before it is used. Citation
//! integrity problems are tolerated: the assembler substitutes placeholder
//! sources for unknown numbers and closes dangling `{{n}}` markers.

#![warn(missing_docs)]

pub mod assembler;
pub mod citations;
mod config;
mod error;
mod parser;
mod prompt;
pub mod schema;
mod types;
mod verifier;

pub use assembler::{assemble, degraded, merge_sources, FALLBACK_SOURCE_URL};
pub use citations::{check_citations, CitationIssue};
pub use config::VerifierConfig;
pub use error::VerifierError;
pub use parser::parse_verification_response;
pub use types::{CitedSource, VerificationResult};
pub use verifier::ClaimVerifier;
