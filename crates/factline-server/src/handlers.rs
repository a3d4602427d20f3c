//! HTTP request handlers for the server.
//!
//! Each route maps onto one pipeline entry point. Errors are returned as
//! JSON `{"error": "..."}` bodies.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router as AxumRouter,
};
use factline_domain::traits::{TextGenerator, WebSearch};
use factline_domain::{Claim, Source};
use factline_pipeline::{
    ErrorKind, FactChecker, InMemorySubmissionStore, PipelineError, PipelineSummary, VerificationReport,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Minimum submission length, in characters
pub const MIN_SUBMISSION_CHARS: usize = 50;

/// Shared application state
pub struct AppState<G, W>
where
    G: TextGenerator,
    W: WebSearch,
{
    /// Pipeline entry points
    pub checker: Arc<FactChecker<G, W>>,
    /// Submissions posted to this process
    pub store: Arc<InMemorySubmissionStore>,
}

impl<G, W> Clone for AppState<G, W>
where
    G: TextGenerator,
    W: WebSearch,
{
    fn clone(&self) -> Self {
        Self {
            checker: Arc::clone(&self.checker),
            store: Arc::clone(&self.store),
        }
    }
}

impl<G, W> AppState<G, W>
where
    G: TextGenerator,
    W: WebSearch,
{
    /// Create state with an empty submission store
    pub fn new(checker: FactChecker<G, W>) -> Self {
        Self::with_store(checker, InMemorySubmissionStore::new())
    }

    /// Create state around an existing submission store
    pub fn with_store(checker: FactChecker<G, W>, store: InMemorySubmissionStore) -> Self {
        Self {
            checker: Arc::new(checker),
            store: Arc::new(store),
        }
    }
}

/// Claim extraction request
#[derive(Debug, Deserialize)]
pub struct ExtractClaimsRequest {
    /// Source text
    pub text: String,
}

/// Search-and-verify request
#[derive(Debug, Deserialize)]
pub struct SearchAndVerifyRequest {
    /// Positioned claims, typically from `/api/extract-claims`
    pub claims: Vec<Claim>,
}

/// Single-query search request
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// Search query
    pub query: String,
}

/// Submission request
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    /// Text to store
    pub content: String,
}

/// Extracted claims
#[derive(Debug, Serialize, Deserialize)]
pub struct ClaimsResponse {
    /// Positioned, not-yet-verified claims
    pub claims: Vec<Claim>,
}

/// Verified claims with per-status tallies
#[derive(Debug, Serialize)]
pub struct VerificationResponse {
    /// Claims in input order
    pub claims: Vec<Claim>,
    /// Per-status counts
    pub summary: PipelineSummary,
}

impl From<VerificationReport> for VerificationResponse {
    fn from(report: VerificationReport) -> Self {
        Self {
            claims: report.claims,
            summary: report.summary,
        }
    }
}

/// Evidence set for one query
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Ranked sources
    pub results: Vec<Source>,
}

/// Id of a stored submission
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitResponse {
    /// Submission id
    pub id: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall health status
    pub status: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// The request body could not be read
    BadRequest(String),
    /// A pipeline entry point failed as a whole
    Pipeline(PipelineError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Pipeline(e) => {
                let status = match e.kind {
                    ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
                    ErrorKind::NotFound => StatusCode::NOT_FOUND,
                    ErrorKind::Service => StatusCode::BAD_GATEWAY,
                };
                (status, e.to_string())
            }
        };

        if status.is_server_error() {
            warn!(%status, error = %message, "Request failed");
        }
        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

impl From<PipelineError> for AppError {
    fn from(e: PipelineError) -> Self {
        AppError::Pipeline(e)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// POST /api/extract-claims - Extract and position claims
async fn extract_claims<G, W>(
    State(state): State<AppState<G, W>>,
    request: Result<Json<ExtractClaimsRequest>, JsonRejection>,
) -> Result<Json<ClaimsResponse>, AppError>
where
    G: TextGenerator + 'static,
    W: WebSearch + 'static,
{
    let Json(request) = request?;
    let claims = state.checker.extract_claims(&request.text).await?;
    Ok(Json(ClaimsResponse { claims }))
}

/// POST /api/search-and-verify - Search, verify and assemble claims
async fn search_and_verify<G, W>(
    State(state): State<AppState<G, W>>,
    request: Result<Json<SearchAndVerifyRequest>, JsonRejection>,
) -> Result<Json<VerificationResponse>, AppError>
where
    G: TextGenerator + 'static,
    W: WebSearch + 'static,
{
    let Json(request) = request?;
    let report = state.checker.search_and_verify_with_report(request.claims).await;
    Ok(Json(report.into()))
}

/// POST /api/search - Evidence set for a single query
async fn search<G, W>(
    State(state): State<AppState<G, W>>,
    request: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, AppError>
where
    G: TextGenerator + 'static,
    W: WebSearch + 'static,
{
    let Json(request) = request?;
    let results = state.checker.search(&request.query).await?;
    Ok(Json(SearchResponse { results }))
}

/// POST /api/submissions - Store text for later checking
async fn submit<G, W>(
    State(state): State<AppState<G, W>>,
    request: Result<Json<SubmitRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SubmitResponse>), AppError>
where
    G: TextGenerator + 'static,
    W: WebSearch + 'static,
{
    let Json(request) = request?;
    let length = request.content.trim().chars().count();
    if length < MIN_SUBMISSION_CHARS {
        return Err(AppError::BadRequest(format!(
            "Content must be at least {} characters long",
            MIN_SUBMISSION_CHARS
        )));
    }

    let id = state.store.insert(request.content);
    info!(submission_id = %id, chars = length, "Submission stored");
    Ok((StatusCode::CREATED, Json(SubmitResponse { id })))
}

/// POST /api/submissions/:id/check - Full pipeline on a stored submission
async fn check_submission<G, W>(
    State(state): State<AppState<G, W>>,
    Path(id): Path<String>,
) -> Result<Json<VerificationResponse>, AppError>
where
    G: TextGenerator + 'static,
    W: WebSearch + 'static,
{
    let report = state.checker.check_submission(state.store.as_ref(), &id).await?;
    Ok(Json(report.into()))
}

/// GET /health - Liveness check
async fn health_check() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
    })
}

/// Create the axum router with all routes
pub fn create_router<G, W>(state: AppState<G, W>) -> AxumRouter
where
    G: TextGenerator + 'static,
    W: WebSearch + 'static,
{
    AxumRouter::new()
        .route("/api/extract-claims", post(extract_claims::<G, W>))
        .route("/api/search-and-verify", post(search_and_verify::<G, W>))
        .route("/api/search", post(search::<G, W>))
        .route("/api/submissions", post(submit::<G, W>))
        .route("/api/submissions/:id/check", post(check_submission::<G, W>))
        .route("/health", get(health_check))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use factline_llm::MockProvider;
    use factline_pipeline::PipelineConfig;
    use factline_search::MockSearch;
    use tower::ServiceExt; // for oneshot

    fn create_test_state() -> AppState<MockProvider, MockSearch> {
        let checker = FactChecker::new(
            Arc::new(MockProvider::default()),
            Arc::new(MockSearch::default()),
            PipelineConfig::default(),
        )
        .unwrap();
        AppState::new(checker)
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = create_router(create_test_state());

        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_short_submission_rejected() {
        let state = create_test_state();
        let app = create_router(state.clone());

        let request = Request::builder()
            .method("POST")
            .uri("/api/submissions")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"content": "Too short."}"#))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(state.store.is_empty());
    }

    #[test]
    fn test_error_status_mapping() {
        use factline_pipeline::Stage;

        let cases = [
            (ErrorKind::InvalidInput, StatusCode::BAD_REQUEST),
            (ErrorKind::NotFound, StatusCode::NOT_FOUND),
            (ErrorKind::Service, StatusCode::BAD_GATEWAY),
        ];
        for (kind, expected) in cases {
            let response = AppError::Pipeline(PipelineError::new(Stage::Extraction, kind, "cause")).into_response();
            assert_eq!(response.status(), expected);
        }
    }
}
