//! Result types for extraction

use factline_domain::Claim;
use serde::Serialize;

/// Result of an extraction operation
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    /// Positioned claims, ids 1..=n in extraction order
    pub claims: Vec<Claim>,

    /// Extracted claims that did not make it into `claims`
    pub failures: Vec<ExtractionFailure>,

    /// Metadata about the extraction
    pub metadata: ExtractionMetadata,
}

/// Why an extracted claim was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureReason {
    /// The anchor text does not occur verbatim in the source
    AnchorNotFound,
    /// Same anchor and claim text as an earlier claim
    Duplicate,
    /// Past the per-submission claim cap
    OverLimit,
}

/// Information about a claim that was dropped during resolution
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionFailure {
    /// Reason for failure
    pub reason: FailureReason,

    /// Claim text as extracted
    pub claim: String,

    /// Anchor text as extracted
    pub exact_text: String,
}

/// Metadata about an extraction operation
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionMetadata {
    /// Name of the model used
    pub model_name: String,

    /// Number of claims the service returned
    pub total_claims_extracted: usize,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}
