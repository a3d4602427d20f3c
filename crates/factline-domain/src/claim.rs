//! Claim module - the central entity of the verification pipeline

use crate::{MergedSource, Score};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a claim, unique within one submission
///
/// Assigned at extraction time, 1-based, in extraction order.
pub type ClaimId = u32;

/// Verification status of a claim
///
/// Every claim starts at [`ClaimStatus::NotYetVerified`] and transitions once
/// to one of the four terminal values after verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClaimStatus {
    /// Not verified yet
    #[default]
    #[serde(alias = "not yet verified")]
    NotYetVerified,
    /// Credible sources directly confirm the claim
    Supported,
    /// Reliable sources directly disprove the claim
    Contradicted,
    /// Credible sources conflict with each other
    Debated,
    /// No adequate evidence either way
    #[serde(alias = "insufficient information")]
    InsufficientInformation,
}

impl ClaimStatus {
    /// All terminal statuses, in the order verdicts are usually reported
    pub const TERMINAL: [ClaimStatus; 4] = [
        ClaimStatus::Supported,
        ClaimStatus::Contradicted,
        ClaimStatus::Debated,
        ClaimStatus::InsufficientInformation,
    ];

    /// Whether verification has produced this status
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ClaimStatus::NotYetVerified)
    }

    /// Wire name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::NotYetVerified => "not-yet-verified",
            ClaimStatus::Supported => "supported",
            ClaimStatus::Contradicted => "contradicted",
            ClaimStatus::Debated => "debated",
            ClaimStatus::InsufficientInformation => "insufficient-information",
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A claim as returned by the extraction service, before it is anchored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedClaim {
    /// Self-contained restatement of the assertion
    pub claim: String,

    /// Verbatim contiguous substring of the source
    pub exact_text: String,

    /// Question engineered to retrieve verifying evidence
    pub search_query: String,
}

/// A claim anchored in the source text, with its verification state
///
/// `id`, `exact_text`, `start`, `end` and `search_query` are fixed once the claim
/// is positioned. The verification fields are written once per verification cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    /// 1-based id in extraction order
    pub id: ClaimId,

    /// Verbatim anchor text; `source[start..end] == exact_text`
    pub exact_text: String,

    /// Context-independent restatement of the assertion
    #[serde(rename = "claim")]
    pub claim_text: String,

    /// Byte offset of the anchor's first byte
    pub start: usize,

    /// Byte offset one past the anchor's last byte
    pub end: usize,

    /// Question used to retrieve evidence
    pub search_query: String,

    /// Verification status
    #[serde(default)]
    pub status: ClaimStatus,

    /// Overall certainty in the verdict, `None` until verified
    #[serde(default)]
    pub confidence: Option<Score>,

    /// Explanation with `{{n}}` citation markers, `None` until verified
    #[serde(default)]
    pub explanation: Option<String>,

    /// Corrected claim text, only for contradicted claims
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_fix: Option<String>,

    /// Sources in the order the verifier cited them
    #[serde(default)]
    pub sources: Vec<MergedSource>,
}

impl Claim {
    /// Create a positioned, not-yet-verified claim
    pub fn positioned(id: ClaimId, extracted: ExtractedClaim, start: usize, end: usize) -> Self {
        Self {
            id,
            exact_text: extracted.exact_text,
            claim_text: extracted.claim,
            start,
            end,
            search_query: extracted.search_query,
            status: ClaimStatus::NotYetVerified,
            confidence: None,
            explanation: None,
            suggested_fix: None,
            sources: Vec::new(),
        }
    }

    /// Whether `source[start..end]` is exactly the anchor text
    pub fn is_anchored_in(&self, source: &str) -> bool {
        self.start < self.end
            && source.get(self.start..self.end) == Some(self.exact_text.as_str())
    }

    /// Whether verification has completed for this claim
    pub fn is_verified(&self) -> bool {
        self.status.is_terminal()
    }

    /// Return the claim to the not-yet-verified state, keeping its position
    pub fn reset_verification(&mut self) {
        self.status = ClaimStatus::NotYetVerified;
        self.confidence = None;
        self.explanation = None;
        self.suggested_fix = None;
        self.sources.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extracted() -> ExtractedClaim {
        ExtractedClaim {
            claim: "The Eiffel Tower's height is 330 meters.".to_string(),
            exact_text: "The Eiffel Tower is 330 meters tall.".to_string(),
            search_query: "What is the height of the Eiffel Tower?".to_string(),
        }
    }

    #[test]
    fn test_positioned_claim_defaults() {
        let claim = Claim::positioned(1, extracted(), 0, 36);
        assert_eq!(claim.status, ClaimStatus::NotYetVerified);
        assert!(claim.confidence.is_none());
        assert!(claim.explanation.is_none());
        assert!(claim.sources.is_empty());
        assert!(!claim.is_verified());
    }

    #[test]
    fn test_anchor_check() {
        let source = "The Eiffel Tower is 330 meters tall. It was built in 1887.";
        let claim = Claim::positioned(1, extracted(), 0, 36);
        assert!(claim.is_anchored_in(source));

        let shifted = Claim::positioned(1, extracted(), 1, 37);
        assert!(!shifted.is_anchored_in(source));

        let out_of_bounds = Claim::positioned(1, extracted(), 40, 400);
        assert!(!out_of_bounds.is_anchored_in(source));
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&ClaimStatus::InsufficientInformation).unwrap(),
            "\"insufficient-information\""
        );
        let legacy: ClaimStatus = serde_json::from_str("\"insufficient information\"").unwrap();
        assert_eq!(legacy, ClaimStatus::InsufficientInformation);
        let pending: ClaimStatus = serde_json::from_str("\"not yet verified\"").unwrap();
        assert_eq!(pending, ClaimStatus::NotYetVerified);
    }

    #[test]
    fn test_claim_json_shape() {
        let claim = Claim::positioned(3, extracted(), 0, 36);
        let json = serde_json::to_value(&claim).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["exactText"], "The Eiffel Tower is 330 meters tall.");
        assert_eq!(json["claim"], "The Eiffel Tower's height is 330 meters.");
        assert_eq!(json["status"], "not-yet-verified");
        assert!(json["confidence"].is_null());
        assert!(json.get("suggestedFix").is_none());
    }

    #[test]
    fn test_claim_accepts_minimal_request_shape() {
        let json = r#"{
            "id": 1,
            "exactText": "It was built in 1887.",
            "claim": "The Eiffel Tower was built in 1887.",
            "start": 37,
            "end": 58,
            "searchQuery": "When was the Eiffel Tower built?"
        }"#;
        let claim: Claim = serde_json::from_str(json).unwrap();
        assert_eq!(claim.status, ClaimStatus::NotYetVerified);
        assert!(claim.sources.is_empty());
    }

    #[test]
    fn test_reset_verification() {
        let mut claim = Claim::positioned(1, extracted(), 0, 36);
        claim.status = ClaimStatus::Contradicted;
        claim.confidence = Some(Score::new(90).unwrap());
        claim.suggested_fix = Some("fix".to_string());
        claim.reset_verification();
        assert_eq!(claim.status, ClaimStatus::NotYetVerified);
        assert!(claim.suggested_fix.is_none());
        assert_eq!(claim.start, 0);
    }
}
