//! The FactChecker orchestrator
//!
//! Extraction is all-or-nothing. Retrieval, verification and assembly run per
//! claim, concurrently, and a failure in one claim never reaches another:
//! retrieval failures fall back to an empty evidence set and verification
//! failures produce a degraded `insufficient-information` verdict.

use crate::config::PipelineConfig;
use crate::error::{ConfigError, ErrorKind, PipelineError, Stage};
use crate::retriever::EvidenceRetriever;
use crate::summary::PipelineSummary;
use factline_domain::traits::{SubmissionStore, TextGenerator, WebSearch};
use factline_domain::{Claim, ClaimId, Source};
use factline_extractor::{ExtractionResult, Extractor};
use factline_verifier::{assemble, degraded, ClaimVerifier};
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tracing::{info, warn};

/// A recovered per-claim failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimFailure {
    /// Claim the failure belongs to
    pub claim_id: ClaimId,

    /// Stage that failed
    pub stage: Stage,

    /// Underlying cause
    pub reason: String,
}

/// Output of [`FactChecker::search_and_verify_with_report`]
#[derive(Debug, Clone, Serialize)]
pub struct VerificationReport {
    /// Enriched claims, in input order
    pub claims: Vec<Claim>,

    /// Failures that were recovered while producing `claims`
    pub failures: Vec<ClaimFailure>,

    /// Per-status tallies of `claims`
    pub summary: PipelineSummary,
}

/// Runs extract → resolve → search → verify → assemble
pub struct FactChecker<G, W>
where
    G: TextGenerator,
    W: WebSearch,
{
    extractor: Extractor<G>,
    retriever: EvidenceRetriever<W>,
    verifier: ClaimVerifier<G>,
    max_concurrent_claims: usize,
}

impl<G, W> FactChecker<G, W>
where
    G: TextGenerator,
    W: WebSearch,
{
    /// Create a checker from explicitly constructed service handles
    pub fn new(generator: Arc<G>, search: Arc<W>, config: PipelineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let extractor = Extractor::new(Arc::clone(&generator), config.extractor)
            .map_err(|e| ConfigError(e.to_string()))?;
        let verifier = ClaimVerifier::new(generator, config.verifier)
            .map_err(|e| ConfigError(e.to_string()))?;
        Ok(Self {
            extractor,
            retriever: EvidenceRetriever::new(search, config.retriever),
            verifier,
            max_concurrent_claims: config.max_concurrent_claims,
        })
    }

    /// Extract and position claims, with drop details
    pub async fn extract(&self, text: &str) -> Result<ExtractionResult, PipelineError> {
        self.extractor.extract(text).await.map_err(|e| {
            warn!(stage = %Stage::Extraction, error = %e, "Extraction failed");
            PipelineError::from(e)
        })
    }

    /// Extract and position claims (stages 1 and 2)
    pub async fn extract_claims(&self, text: &str) -> Result<Vec<Claim>, PipelineError> {
        Ok(self.extract(text).await?.claims)
    }

    /// Retrieve the evidence set for a single query
    pub async fn search(&self, query: &str) -> Result<Vec<Source>, PipelineError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(PipelineError::new(Stage::Retrieval, ErrorKind::InvalidInput, "query is empty"));
        }
        self.retriever
            .retrieve(query)
            .await
            .map_err(|e| PipelineError::new(Stage::Retrieval, ErrorKind::Service, e.to_string()))
    }

    /// Search, verify and assemble every claim (stages 3 to 5)
    ///
    /// Never fails as a whole; claims whose verification failed come back degraded.
    pub async fn search_and_verify(&self, claims: Vec<Claim>) -> Vec<Claim> {
        self.search_and_verify_with_report(claims).await.claims
    }

    /// Like [`search_and_verify`](Self::search_and_verify), also reporting recovered failures
    pub async fn search_and_verify_with_report(&self, claims: Vec<Claim>) -> VerificationReport {
        let start_time = Instant::now();
        let total = claims.len();
        info!(claims = total, max_concurrent = self.max_concurrent_claims, "Starting search and verify");

        let semaphore = Semaphore::new(self.max_concurrent_claims);
        let semaphore = &semaphore;
        let futures = claims.into_iter().map(|claim| async move {
            // The semaphore is never closed, so acquire cannot fail.
            let _permit = semaphore.acquire().await.ok();
            self.process_claim(claim).await
        });

        // join_all yields results in input order, not completion order.
        let results = join_all(futures).await;

        let mut claims = Vec::with_capacity(total);
        let mut failures = Vec::new();
        for (claim, claim_failures) in results {
            claims.push(claim);
            failures.extend(claim_failures);
        }

        let summary = PipelineSummary::from_claims(&claims);
        info!(
            claims = total,
            failures = failures.len(),
            supported = summary.supported,
            contradicted = summary.contradicted,
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "Search and verify complete"
        );

        VerificationReport {
            claims,
            failures,
            summary,
        }
    }

    /// Extract, then search and verify
    pub async fn check_text(&self, text: &str) -> Result<VerificationReport, PipelineError> {
        let claims = self.extract_claims(text).await?;
        Ok(self.search_and_verify_with_report(claims).await)
    }

    /// Run the full pipeline on a stored submission
    pub async fn check_submission<S>(&self, store: &S, id: &str) -> Result<VerificationReport, PipelineError>
    where
        S: SubmissionStore,
    {
        let submission = store
            .get_submission(id)
            .await
            .map_err(|e| PipelineError::new(Stage::Submission, ErrorKind::Service, e.to_string()))?
            .ok_or_else(|| {
                PipelineError::new(
                    Stage::Submission,
                    ErrorKind::NotFound,
                    format!("submission {} not found", id),
                )
            })?;
        info!(submission_id = %submission.id, "Checking submission");
        self.check_text(&submission.content).await
    }

    async fn process_claim(&self, mut claim: Claim) -> (Claim, Vec<ClaimFailure>) {
        let claim_id = claim.id;
        let mut failures = Vec::new();
        if claim.is_verified() {
            claim.reset_verification();
        }

        let query = self.retriever.query_for(&claim).to_string();
        if query.is_empty() {
            let reason = "claim has no search input".to_string();
            warn!(claim_id, stage = %Stage::Retrieval, %reason, "Claim degraded");
            let degraded_claim = degraded(&claim, &reason);
            failures.push(ClaimFailure {
                claim_id,
                stage: Stage::Retrieval,
                reason,
            });
            return (degraded_claim, failures);
        }

        let sources = match self.retriever.retrieve(&query).await {
            Ok(sources) => sources,
            Err(e) => {
                warn!(claim_id, stage = %Stage::Retrieval, error = %e, "Retrieval failed, verifying without evidence");
                failures.push(ClaimFailure {
                    claim_id,
                    stage: Stage::Retrieval,
                    reason: e.to_string(),
                });
                Vec::new()
            }
        };

        match self
            .verifier
            .verify(claim_id, &claim.claim_text, &query, &sources)
            .await
        {
            Ok(verification) => (assemble(&claim, &sources, &verification), failures),
            Err(e) => {
                warn!(claim_id, stage = %Stage::Verification, error = %e, "Verification failed, claim degraded");
                let reason = e.to_string();
                let degraded_claim = degraded(&claim, &reason);
                failures.push(ClaimFailure {
                    claim_id,
                    stage: Stage::Verification,
                    reason,
                });
                (degraded_claim, failures)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use factline_domain::{ClaimStatus, ExtractedClaim, SearchHit};
    use factline_llm::MockProvider;
    use factline_search::MockSearch;

    fn claim(id: u32, claim_text: &str, query: &str) -> Claim {
        Claim::positioned(
            id,
            ExtractedClaim {
                claim: claim_text.to_string(),
                exact_text: claim_text.to_string(),
                search_query: query.to_string(),
            },
            0,
            claim_text.len(),
        )
    }

    fn supported() -> &'static str {
        r#"{"status": "supported", "confidence": 80, "explanation": "Confirmed {{1}}.", "suggestedFix": null,
            "citedSources": [{"sourceNumber": 1, "stance": "support", "agreementPercentage": 90, "pertinence": 90, "relevantSnippet": "yes"}]}"#
    }

    fn checker(llm: MockProvider, search: MockSearch) -> FactChecker<MockProvider, MockSearch> {
        FactChecker::new(Arc::new(llm), Arc::new(search), PipelineConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_empty_claim_list() {
        let report = checker(MockProvider::default(), MockSearch::default())
            .search_and_verify_with_report(Vec::new())
            .await;
        assert!(report.claims.is_empty());
        assert_eq!(report.summary.total, 0);
    }

    #[tokio::test]
    async fn test_empty_search_input_is_degraded_without_calls() {
        let llm = MockProvider::new(supported());
        let search = MockSearch::default();
        let checker = checker(llm.clone(), search.clone());

        let report = checker
            .search_and_verify_with_report(vec![claim(1, "Sky is blue.", "   ")])
            .await;
        assert_eq!(report.claims[0].status, ClaimStatus::InsufficientInformation);
        assert_eq!(report.failures[0].stage, Stage::Retrieval);
        assert_eq!(llm.call_count(), 0);
        assert_eq!(search.call_count(), 0);
    }

    #[tokio::test]
    async fn test_retrieval_failure_still_verifies() {
        let llm = MockProvider::new(supported());
        let mut search = MockSearch::default();
        search.add_error("broken");
        let checker = checker(llm.clone(), search);

        let report = checker
            .search_and_verify_with_report(vec![claim(1, "Claim.", "broken query?")])
            .await;
        assert_eq!(llm.call_count(), 1);
        assert!(llm.prompts()[0].contains("the search returned no evidence"));
        assert_eq!(report.claims[0].status, ClaimStatus::Supported);
        // {{1}} was cited but nothing was retrieved
        assert_eq!(report.claims[0].sources[0].url, factline_verifier::FALLBACK_SOURCE_URL);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].stage, Stage::Retrieval);
    }

    #[tokio::test]
    async fn test_already_verified_claim_is_reverified() {
        let llm = MockProvider::new(supported());
        let search = MockSearch::new(vec![SearchHit::new("https://a.example", "text")]);
        let checker = checker(llm, search);

        let mut stale = claim(1, "Claim.", "Query?");
        stale.status = ClaimStatus::Contradicted;
        stale.suggested_fix = Some("old fix".to_string());

        let claims = checker.search_and_verify(vec![stale]).await;
        assert_eq!(claims[0].status, ClaimStatus::Supported);
        assert!(claims[0].suggested_fix.is_none());
        assert_eq!(claims[0].sources[0].url, "https://a.example");
    }

    #[tokio::test]
    async fn test_search_rejects_blank_query() {
        let checker = checker(MockProvider::default(), MockSearch::default());
        let err = checker.search("  ").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidInput);
        assert_eq!(err.stage, Stage::Retrieval);
    }

    #[test]
    fn test_invalid_config() {
        let config = PipelineConfig {
            max_concurrent_claims: 0,
            ..PipelineConfig::default()
        };
        let result = FactChecker::new(Arc::new(MockProvider::default()), Arc::new(MockSearch::default()), config);
        assert!(result.is_err());
    }
}
