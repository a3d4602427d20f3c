//! Verification output types

use factline_domain::{ClaimStatus, Score, Stance};
use serde::Serialize;

/// The verifier's assessment of one source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CitedSource {
    /// Rank of the source within the claim's evidence set
    pub source_number: u32,

    /// Relationship of the source to the claim
    pub stance: Stance,

    /// How strongly this source agrees with the claim
    pub agreement_percentage: Score,

    /// Topical relevance of this source
    pub pertinence: Score,

    /// Verbatim quote from the source (may be empty)
    pub relevant_snippet: String,
}

/// A validated verdict for one claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    /// Terminal status
    pub status: ClaimStatus,

    /// Overall certainty in the verdict
    pub confidence: Score,

    /// Reasoning with `{{n}}` citation markers
    pub explanation: String,

    /// Corrected claim; always present when `status` is contradicted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_fix: Option<String>,

    /// Per-source assessments, in the order the verifier emitted them
    pub cited_sources: Vec<CitedSource>,
}
