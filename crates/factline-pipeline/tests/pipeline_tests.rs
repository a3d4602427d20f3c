//! End-to-end pipeline tests against the mock generator and mock search

use factline_domain::citation::referenced_numbers;
use factline_domain::{Claim, ClaimStatus, ExtractedClaim, SearchHit, Stance};
use factline_llm::MockProvider;
use factline_pipeline::{ErrorKind, FactChecker, InMemorySubmissionStore, PipelineConfig, Stage};
use factline_search::MockSearch;
use factline_verifier::FALLBACK_SOURCE_URL;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

const EIFFEL_TEXT: &str = "The Eiffel Tower is 330 meters tall. It was built in 1887.";

const EIFFEL_EXTRACTION: &str = r#"{"claims": [
    {"claim": "The Eiffel Tower is 330 meters tall.", "exactText": "The Eiffel Tower is 330 meters tall.", "searchQuery": "How tall is the Eiffel Tower?"},
    {"claim": "The Eiffel Tower was built in 1887.", "exactText": "It was built in 1887.", "searchQuery": "When was the Eiffel Tower built?"}
]}"#;

const HEIGHT_VERDICT: &str = r#"{
    "status": "supported",
    "confidence": 90,
    "explanation": "The tower is 330 m tall including antennas {{1}} {{2}}.",
    "suggestedFix": null,
    "citedSources": [
        {"sourceNumber": 1, "stance": "support", "agreementPercentage": 95, "pertinence": 95, "relevantSnippet": "330 metres"},
        {"sourceNumber": 2, "stance": "support", "agreementPercentage": 80, "pertinence": 85, "relevantSnippet": "height of 330 m"}
    ]
}"#;

const BUILT_VERDICT: &str = r#"{
    "status": "contradicted",
    "confidence": 85,
    "explanation": "Construction began in 1887 but finished in 1889 {{2}}, as also noted by {{3}}.",
    "suggestedFix": "The Eiffel Tower was built between 1887 and 1889.",
    "citedSources": [
        {"sourceNumber": 2, "stance": "contradict", "agreementPercentage": 20, "pertinence": 90, "relevantSnippet": "completed in 1889"}
    ]
}"#;

fn hits(prefix: &str, n: usize) -> Vec<SearchHit> {
    (1..=n)
        .map(|i| {
            SearchHit::new(format!("https://{}{}.example", prefix, i), format!("{} document {}", prefix, i))
                .with_title(format!("{} {}", prefix, i))
        })
        .collect()
}

fn eiffel_llm() -> MockProvider {
    let mut llm = MockProvider::default();
    llm.add_response("Text to analyze:", EIFFEL_EXTRACTION);
    llm.add_response("Search Query Used:\nHow tall", HEIGHT_VERDICT);
    llm.add_response("Search Query Used:\nWhen was", BUILT_VERDICT);
    llm
}

fn eiffel_search() -> MockSearch {
    let mut search = MockSearch::default();
    search.add_results("How tall", hits("height", 3));
    search.add_results("When was", hits("built", 3));
    search
}

fn checker(llm: &MockProvider, search: &MockSearch) -> FactChecker<MockProvider, MockSearch> {
    FactChecker::new(Arc::new(llm.clone()), Arc::new(search.clone()), PipelineConfig::default()).unwrap()
}

fn positioned(id: u32, text: &str, query: &str) -> Claim {
    Claim::positioned(
        id,
        ExtractedClaim {
            claim: text.to_string(),
            exact_text: text.to_string(),
            search_query: query.to_string(),
        },
        0,
        text.len(),
    )
}

fn verdict_for(status: &str, fix: &str) -> String {
    format!(
        r#"{{"status": "{}", "confidence": 70, "explanation": "Checked {{{{1}}}}.", "suggestedFix": {},
            "citedSources": [{{"sourceNumber": 1, "stance": "support", "agreementPercentage": 70, "pertinence": 70, "relevantSnippet": "s"}}]}}"#,
        status, fix
    )
}

#[tokio::test]
async fn test_eiffel_tower_end_to_end() {
    let llm = eiffel_llm();
    let search = eiffel_search();
    let checker = checker(&llm, &search);

    let claims = checker.extract_claims(EIFFEL_TEXT).await.unwrap();
    assert_eq!(claims.len(), 2);
    assert_eq!((claims[0].start, claims[0].end), (0, 36));
    assert_eq!((claims[1].start, claims[1].end), (37, 58));
    assert_eq!(claims[1].claim_text, "The Eiffel Tower was built in 1887.");
    assert!(claims.iter().all(|c| c.status == ClaimStatus::NotYetVerified));

    let report = checker.search_and_verify_with_report(claims).await;
    assert!(report.failures.is_empty());
    assert_eq!(report.summary.supported, 1);
    assert_eq!(report.summary.contradicted, 1);

    let height = &report.claims[0];
    assert_eq!(height.status, ClaimStatus::Supported);
    assert_eq!(height.sources.len(), 2);
    assert_eq!(height.sources[0].url, "https://height1.example");
    assert_eq!(height.sources[0].stance, Stance::Support);

    let built = &report.claims[1];
    assert_eq!(built.status, ClaimStatus::Contradicted);
    assert_eq!(
        built.suggested_fix.as_deref(),
        Some("The Eiffel Tower was built between 1887 and 1889.")
    );
    // {{3}} was never cited, so the closure pass appends it
    assert_eq!(built.sources.len(), 2);
    assert_eq!(built.sources[0].source_number, 2);
    assert_eq!(built.sources[1].source_number, 3);
    assert_eq!(built.sources[1].url, "https://built3.example");
    assert_eq!(built.sources[1].stance, Stance::Unclear);
    assert_eq!(built.sources[1].agreement_percentage.value(), 0);

    for claim in &report.claims {
        assert_eq!(&EIFFEL_TEXT[claim.start..claim.end], claim.exact_text);
    }
}

#[tokio::test]
async fn test_output_order_matches_input_under_uneven_latency() {
    let mut llm = MockProvider::default().with_delay(Duration::from_millis(10));
    llm.add_response("Search Query Used:\nQ1", verdict_for("supported", "null"));
    llm.add_response("Search Query Used:\nQ2", verdict_for("debated", "null"));
    llm.add_response("Search Query Used:\nQ3", verdict_for("insufficient information", "null"));

    let mut search = MockSearch::new(hits("d", 3));
    search.add_stall("Q1", Duration::from_millis(200));

    let checker = checker(&llm, &search);
    let claims = vec![
        positioned(1, "First claim.", "Q1?"),
        positioned(2, "Second claim.", "Q2?"),
        positioned(3, "Third claim.", "Q3?"),
    ];
    let result = checker.search_and_verify(claims).await;

    let ids: Vec<_> = result.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    let statuses: Vec<_> = result.iter().map(|c| c.status).collect();
    assert_eq!(
        statuses,
        vec![ClaimStatus::Supported, ClaimStatus::Debated, ClaimStatus::InsufficientInformation]
    );
}

fn three_claims() -> Vec<Claim> {
    vec![
        positioned(1, "First claim.", "Q1?"),
        positioned(2, "Second claim.", "Q2?"),
        positioned(3, "Third claim.", "Q3?"),
    ]
}

#[tokio::test]
async fn test_claims_are_searched_concurrently() {
    let stall = Duration::from_millis(200);
    let llm = MockProvider::new(verdict_for("supported", "null"));
    let search = MockSearch::new(hits("d", 3)).with_delay(stall);

    let checker = checker(&llm, &search);
    let started = Instant::now();
    let result = checker.search_and_verify(three_claims()).await;
    let elapsed = started.elapsed();

    assert_eq!(result.len(), 3);
    assert_eq!(search.peak_in_flight(), 3);
    assert!(elapsed < stall * 2, "took {:?}", elapsed);
}

#[tokio::test]
async fn test_concurrency_cap_serializes_claims() {
    let stall = Duration::from_millis(200);
    let llm = MockProvider::new(verdict_for("supported", "null"));
    let search = MockSearch::new(hits("d", 3)).with_delay(stall);
    let mut config = PipelineConfig::default();
    config.max_concurrent_claims = 1;

    let checker = FactChecker::new(Arc::new(llm), Arc::new(search.clone()), config).unwrap();
    let started = Instant::now();
    let result = checker.search_and_verify(three_claims()).await;
    let elapsed = started.elapsed();

    let ids: Vec<_> = result.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(search.peak_in_flight(), 1);
    assert!(elapsed >= stall * 3, "took {:?}", elapsed);
}

#[tokio::test]
async fn test_one_failing_claim_does_not_affect_others() {
    let mut llm = MockProvider::new(verdict_for("supported", "null"));
    llm.add_error("Search Query Used:\nQ2");
    let search = MockSearch::new(hits("d", 3));

    let checker = checker(&llm, &search);
    let report = checker
        .search_and_verify_with_report(vec![
            positioned(1, "First claim.", "Q1?"),
            positioned(2, "Second claim.", "Q2?"),
            positioned(3, "Third claim.", "Q3?"),
        ])
        .await;

    assert_eq!(report.claims.len(), 3);
    assert_eq!(report.claims[0].status, ClaimStatus::Supported);
    assert_eq!(report.claims[2].status, ClaimStatus::Supported);

    let failed = &report.claims[1];
    assert_eq!(failed.status, ClaimStatus::InsufficientInformation);
    assert_eq!(failed.confidence.map(|c| c.value()), Some(0));
    assert!(failed.sources.is_empty());
    assert!(failed
        .explanation
        .as_deref()
        .unwrap()
        .starts_with("Verification could not be completed"));

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].claim_id, 2);
    assert_eq!(report.failures[0].stage, Stage::Verification);
}

#[tokio::test]
async fn test_failing_search_keeps_siblings_verified() {
    let llm = MockProvider::new(verdict_for("supported", "null"));
    let mut search = MockSearch::new(hits("d", 3));
    search.add_error("Q2");

    let report = checker(&llm, &search)
        .search_and_verify_with_report(vec![
            positioned(1, "First claim.", "Q1?"),
            positioned(2, "Second claim.", "Q2?"),
            positioned(3, "Third claim.", "Q3?"),
        ])
        .await;

    for claim in [&report.claims[0], &report.claims[2]] {
        assert_eq!(claim.status, ClaimStatus::Supported);
        assert_eq!(claim.sources[0].url, "https://d1.example");
    }
    // Claim 2 is still verified, against an empty evidence set
    assert!(report.claims[1].status.is_terminal());
    assert_eq!(llm.call_count(), 3);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].claim_id, 2);
    assert_eq!(report.failures[0].stage, Stage::Retrieval);
}

#[tokio::test]
async fn test_every_marker_resolves_to_a_source() {
    let verdict = r#"{"status": "debated", "confidence": 55,
        "explanation": "Some say yes {{1}}, others no {{4}} and {{2}}.",
        "suggestedFix": null,
        "citedSources": [
            {"sourceNumber": 1, "stance": "support", "agreementPercentage": 80, "pertinence": 80, "relevantSnippet": "yes"},
            {"sourceNumber": 1, "stance": "support", "agreementPercentage": 80, "pertinence": 80, "relevantSnippet": "yes again"}
        ]}"#;
    let llm = MockProvider::new(verdict);
    let search = MockSearch::new(hits("d", 3));

    let claims = checker(&llm, &search)
        .search_and_verify(vec![positioned(1, "A contested claim.", "Is it?")])
        .await;
    let claim = &claims[0];

    let available: HashSet<u32> = claim.sources.iter().map(|s| s.source_number).collect();
    for n in referenced_numbers(claim.explanation.as_deref().unwrap()) {
        assert!(available.contains(&n), "marker {{{{{}}}}} has no source", n);
    }
    // Duplicate citations are kept, unknown marker 4 gets the placeholder URL
    assert_eq!(claim.sources.len(), 4);
    let four = claim.sources.iter().find(|s| s.source_number == 4).unwrap();
    assert_eq!(four.url, FALLBACK_SOURCE_URL);
}

#[tokio::test]
async fn test_contradicted_without_fix_is_degraded() {
    let llm = MockProvider::new(verdict_for("contradicted", "null"));
    let search = MockSearch::new(hits("d", 3));

    let report = checker(&llm, &search)
        .search_and_verify_with_report(vec![positioned(1, "Wrong claim.", "Is it?")])
        .await;
    assert_eq!(report.claims[0].status, ClaimStatus::InsufficientInformation);
    assert!(report.claims[0].suggested_fix.is_none());
    assert_eq!(report.failures[0].stage, Stage::Verification);
}

#[tokio::test]
async fn test_search_and_verify_is_repeatable() {
    let llm = eiffel_llm();
    let search = eiffel_search();
    let checker = checker(&llm, &search);

    let claims = checker.extract_claims(EIFFEL_TEXT).await.unwrap();
    let first = checker.search_and_verify(claims.clone()).await;
    let second = checker.search_and_verify(first.clone()).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_extraction_failure_is_whole_request() {
    let mut llm = MockProvider::default();
    llm.add_response("Text to analyze:", "not json at all");
    let search = MockSearch::default();

    let err = checker(&llm, &search).check_text(EIFFEL_TEXT).await.unwrap_err();
    assert_eq!(err.stage, Stage::Extraction);
    assert_eq!(err.kind, ErrorKind::Service);
    assert_eq!(search.call_count(), 0);
}

#[tokio::test]
async fn test_empty_text_is_invalid_input() {
    let llm = MockProvider::default();
    let search = MockSearch::default();

    let err = checker(&llm, &search).check_text("   ").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidInput);
    assert_eq!(llm.call_count(), 0);
}

#[tokio::test]
async fn test_text_without_claims() {
    let mut llm = MockProvider::default();
    llm.add_response("Text to analyze:", r#"{"claims": []}"#);
    let search = MockSearch::default();

    let report = checker(&llm, &search)
        .check_text("What a lovely day it is.")
        .await
        .unwrap();
    assert!(report.claims.is_empty());
    assert_eq!(search.call_count(), 0);
}

#[tokio::test]
async fn test_check_submission() {
    let llm = eiffel_llm();
    let search = eiffel_search();
    let store = InMemorySubmissionStore::new();
    let id = store.insert(EIFFEL_TEXT);

    let report = checker(&llm, &search).check_submission(&store, &id).await.unwrap();
    assert_eq!(report.claims.len(), 2);
    assert_eq!(search.call_count(), 2);
}

#[tokio::test]
async fn test_check_unknown_submission() {
    let llm = MockProvider::default();
    let search = MockSearch::default();
    let store = InMemorySubmissionStore::new();

    let err = checker(&llm, &search)
        .check_submission(&store, "does-not-exist")
        .await
        .unwrap_err();
    assert_eq!(err.stage, Stage::Submission);
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(llm.call_count(), 0);
}

#[tokio::test]
async fn test_verification_timeout_degrades_claim() {
    let llm = MockProvider::new(verdict_for("supported", "null")).with_delay(Duration::from_millis(1_500));
    let search = MockSearch::new(hits("d", 1));
    let mut config = PipelineConfig::default();
    config.verifier.verification_timeout_secs = 1;

    let checker = FactChecker::new(Arc::new(llm), Arc::new(search), config).unwrap();
    let report = checker
        .search_and_verify_with_report(vec![positioned(1, "Slow claim.", "Slow?")])
        .await;
    assert_eq!(report.claims[0].status, ClaimStatus::InsufficientInformation);
    assert_eq!(report.failures[0].stage, Stage::Verification);
}

#[tokio::test]
async fn test_claim_text_search_input() {
    let mut llm = MockProvider::default();
    llm.add_response("Text to analyze:", EIFFEL_EXTRACTION);
    llm.add_response("Search Query Used:\nThe Eiffel Tower is 330", HEIGHT_VERDICT);
    llm.add_response("Search Query Used:\nThe Eiffel Tower was built", BUILT_VERDICT);
    let mut search = MockSearch::default();
    search.add_results("330 meters", hits("height", 3));
    search.add_results("built in 1887", hits("built", 3));

    let mut config = PipelineConfig::default();
    config.retriever.search_input = factline_pipeline::SearchInput::ClaimText;

    let checker = FactChecker::new(Arc::new(llm.clone()), Arc::new(search.clone()), config).unwrap();
    let claims = checker.extract_claims(EIFFEL_TEXT).await.unwrap();
    let verified = checker.search_and_verify(claims).await;

    let queries = search.queries();
    assert!(queries.contains(&"The Eiffel Tower is 330 meters tall.".to_string()));
    assert!(queries.contains(&"The Eiffel Tower was built in 1887.".to_string()));

    // The verifier is told the query that was actually sent
    let prompts = llm.prompts();
    assert!(prompts
        .iter()
        .any(|p| p.contains("Search Query Used:\nThe Eiffel Tower was built in 1887.")));
    assert!(!prompts.iter().any(|p| p.contains("Search Query Used:\nWhen was")));

    assert_eq!(verified[0].status, ClaimStatus::Supported);
    assert_eq!(verified[1].status, ClaimStatus::Contradicted);
}
