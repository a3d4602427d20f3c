//! Per-status tallies for a checked submission

use factline_domain::{Claim, ClaimStatus};
use serde::Serialize;

/// Count of claims per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineSummary {
    /// Total claims
    pub total: usize,
    /// Supported claims
    pub supported: usize,
    /// Contradicted claims
    pub contradicted: usize,
    /// Debated claims
    pub debated: usize,
    /// Claims without adequate evidence (including degraded ones)
    pub insufficient_information: usize,
    /// Claims still awaiting verification
    pub not_yet_verified: usize,
}

impl PipelineSummary {
    /// Tally `claims`
    pub fn from_claims(claims: &[Claim]) -> Self {
        claims.iter().fold(Self::default(), |mut summary, claim| {
            summary.total += 1;
            match claim.status {
                ClaimStatus::Supported => summary.supported += 1,
                ClaimStatus::Contradicted => summary.contradicted += 1,
                ClaimStatus::Debated => summary.debated += 1,
                ClaimStatus::InsufficientInformation => summary.insufficient_information += 1,
                ClaimStatus::NotYetVerified => summary.not_yet_verified += 1,
            }
            summary
        })
    }

    /// Number of claims with the given status
    pub fn count(&self, status: ClaimStatus) -> usize {
        match status {
            ClaimStatus::Supported => self.supported,
            ClaimStatus::Contradicted => self.contradicted,
            ClaimStatus::Debated => self.debated,
            ClaimStatus::InsufficientInformation => self.insufficient_information,
            ClaimStatus::NotYetVerified => self.not_yet_verified,
        }
    }
}
