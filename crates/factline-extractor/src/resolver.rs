//! Position resolution: anchor extracted claims in the source text
//!
//! Each claim's `exact_text` is located verbatim in the source. Claims whose
//! anchor cannot be found are dropped with a warning; duplicates are dropped;
//! the survivors are capped and numbered 1..=n in extraction order.

use crate::config::AnchorPolicy;
use crate::types::{ExtractionFailure, FailureReason};
use factline_domain::{Claim, ClaimId, ExtractedClaim};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Output of position resolution
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Positioned claims, in extraction order
    pub claims: Vec<Claim>,

    /// Claims that were dropped, in extraction order
    pub failures: Vec<ExtractionFailure>,
}

impl Resolution {
    /// Number of claims dropped because their anchor was not found
    pub fn unanchored(&self) -> usize {
        self.failures
            .iter()
            .filter(|f| f.reason == FailureReason::AnchorNotFound)
            .count()
    }
}

/// Maps extracted claims to `[start, end)` byte offsets in the source
#[derive(Debug, Clone, Copy)]
pub struct PositionResolver {
    policy: AnchorPolicy,
    max_claims: usize,
}

impl PositionResolver {
    /// Create a resolver
    pub fn new(policy: AnchorPolicy, max_claims: usize) -> Self {
        Self { policy, max_claims }
    }

    /// Resolve every extracted claim against `source`
    ///
    /// For every returned claim, `&source[claim.start..claim.end] == claim.exact_text`.
    pub fn resolve(&self, source: &str, extracted: Vec<ExtractedClaim>) -> Resolution {
        let mut seen: HashSet<(String, String)> = HashSet::new();
        let mut claims = Vec::new();
        let mut failures = Vec::new();

        for candidate in extracted {
            let key = (candidate.exact_text.clone(), candidate.claim.clone());
            if seen.contains(&key) {
                debug!(exact_text = %candidate.exact_text, "Dropping duplicate claim");
                failures.push(failure(FailureReason::Duplicate, candidate));
                continue;
            }

            let Some(start) = self.policy.locate(source, &candidate.exact_text) else {
                warn!(
                    exact_text = %candidate.exact_text,
                    "Anchor text not found in source, dropping claim"
                );
                failures.push(failure(FailureReason::AnchorNotFound, candidate));
                continue;
            };
            seen.insert(key);

            if claims.len() >= self.max_claims {
                failures.push(failure(FailureReason::OverLimit, candidate));
                continue;
            }

            if !candidate.search_query.trim_end().ends_with('?') {
                warn!(search_query = %candidate.search_query, "Search query is not phrased as a question");
            }

            let end = start + candidate.exact_text.len();
            let id = ClaimId::try_from(claims.len() + 1).unwrap_or(ClaimId::MAX);
            claims.push(Claim::positioned(id, candidate, start, end));
        }

        let over_limit = failures
            .iter()
            .filter(|f| f.reason == FailureReason::OverLimit)
            .count();
        if over_limit > 0 {
            debug!(kept = claims.len(), dropped = over_limit, "Claim cap reached");
        }

        Resolution { claims, failures }
    }
}

fn failure(reason: FailureReason, candidate: ExtractedClaim) -> ExtractionFailure {
    ExtractionFailure {
        reason,
        claim: candidate.claim,
        exact_text: candidate.exact_text,
    }
}
