//! Result assembly: join retrieved sources with the verifier's citations
//!
//! Assembly is a pure function of the claim, its evidence set and the verdict,
//! so running it twice yields identical output.

use crate::types::VerificationResult;
use factline_domain::citation::referenced_numbers;
use factline_domain::{Claim, ClaimStatus, MergedSource, Score, Source, Stance};
use std::collections::HashSet;
use tracing::warn;

/// URL used when a citation names a source number that was never retrieved
pub const FALLBACK_SOURCE_URL: &str = "https://example.com";

/// Explanation prefix for claims whose verification could not finish
pub const DEGRADED_EXPLANATION_PREFIX: &str = "Verification could not be completed";

fn fallback_source(source_number: u32) -> Source {
    Source {
        url: FALLBACK_SOURCE_URL.to_string(),
        title: None,
        source_number,
        source_text: String::new(),
    }
}

fn base_source(sources: &[Source], source_number: u32) -> Source {
    match sources.iter().find(|s| s.source_number == source_number) {
        Some(source) => source.clone(),
        None => {
            warn!(source_number, "Citation refers to a source that was not retrieved, using placeholder");
            fallback_source(source_number)
        }
    }
}

/// Merge the evidence set with the verdict's cited sources
///
/// Output keeps the order of `cited_sources`. Markers in the explanation
/// without a cited entry are appended afterwards, in order of first
/// appearance, with stance `unclear` and zero scores.
pub fn merge_sources(sources: &[Source], verification: &VerificationResult) -> Vec<MergedSource> {
    let mut merged: Vec<MergedSource> = verification
        .cited_sources
        .iter()
        .map(|cited| {
            let base = base_source(sources, cited.source_number);
            MergedSource {
                url: base.url,
                title: base.title,
                source_number: cited.source_number,
                source_text: base.source_text,
                stance: cited.stance,
                agreement_percentage: cited.agreement_percentage,
                pertinence: cited.pertinence,
                relevant_snippet: cited.relevant_snippet.clone(),
            }
        })
        .collect();

    let cited: HashSet<u32> = merged.iter().map(|m| m.source_number).collect();
    for n in referenced_numbers(&verification.explanation) {
        if cited.contains(&n) {
            continue;
        }
        warn!(source_number = n, "Explanation marker has no cited source, adding unclear entry");
        let base = base_source(sources, n);
        merged.push(MergedSource {
            url: base.url,
            title: base.title,
            source_number: n,
            source_text: base.source_text,
            stance: Stance::Unclear,
            agreement_percentage: Score::ZERO,
            pertinence: Score::ZERO,
            relevant_snippet: String::new(),
        });
    }

    merged
}

/// Apply a verdict to a positioned claim
pub fn assemble(claim: &Claim, sources: &[Source], verification: &VerificationResult) -> Claim {
    Claim {
        status: verification.status,
        confidence: Some(verification.confidence),
        explanation: Some(verification.explanation.clone()),
        suggested_fix: verification
            .suggested_fix
            .as_ref()
            .filter(|fix| !fix.trim().is_empty())
            .cloned(),
        sources: merge_sources(sources, verification),
        ..claim.clone()
    }
}

/// Terminal verdict for a claim whose retrieval or verification failed
pub fn degraded(claim: &Claim, cause: &str) -> Claim {
    Claim {
        status: ClaimStatus::InsufficientInformation,
        confidence: Some(Score::ZERO),
        explanation: Some(format!("{}: {}", DEGRADED_EXPLANATION_PREFIX, cause)),
        suggested_fix: None,
        sources: Vec::new(),
        ..claim.clone()
    }
}
