//! Exa search client
//!
//! Calls `POST {endpoint}/search` with automatic search type, live crawling
//! and full page text, authenticated by the `x-api-key` header.

use crate::{backoff_delay, should_retry, SearchError, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS};
use async_trait::async_trait;
use factline_domain::traits::WebSearch;
use factline_domain::SearchHit;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Default Exa API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.exa.ai";

/// Exa web-search client
pub struct ExaClient {
    endpoint: String,
    api_key: String,
    client: reqwest::Client,
    max_retries: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest<'a> {
    query: &'a str,
    #[serde(rename = "type")]
    search_type: &'static str,
    num_results: usize,
    contents: Contents,
}

#[derive(Serialize)]
struct Contents {
    text: bool,
    livecrawl: &'static str,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<ExaResult>,
}

#[derive(Deserialize)]
struct ExaResult {
    url: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    text: Option<String>,
}

impl From<ExaResult> for SearchHit {
    fn from(r: ExaResult) -> Self {
        SearchHit {
            url: r.url,
            title: r.title.filter(|t| !t.trim().is_empty()),
            text: r.text,
        }
    }
}

fn http_client(timeout: Duration) -> Result<reqwest::Client, SearchError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| SearchError::Config(format!("Failed to build HTTP client: {}", e)))
}

impl ExaClient {
    /// Create a new client
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Result<Self, SearchError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(SearchError::Config("Exa API key is empty".to_string()));
        }
        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_key,
            client: http_client(Duration::from_secs(DEFAULT_TIMEOUT_SECS))?,
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    /// Set the number of retries after the first attempt
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, SearchError> {
        self.client = http_client(timeout)?;
        Ok(self)
    }

    async fn attempt(&self, body: &SearchRequest<'_>) -> Result<Vec<SearchHit>, SearchError> {
        let url = format!("{}/search", self.endpoint);
        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let parsed = response
                .json::<SearchResponse>()
                .await
                .map_err(|e| SearchError::InvalidResponse(format!("Failed to parse response: {}", e)))?;
            return Ok(parsed.results.into_iter().map(SearchHit::from).collect());
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(match status {
            StatusCode::TOO_MANY_REQUESTS => SearchError::RateLimitExceeded,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                SearchError::Unauthorized(format!("HTTP {}: {}", status, error_text))
            }
            s if s.is_server_error() => {
                SearchError::Communication(format!("HTTP {}: {}", status, error_text))
            }
            _ => SearchError::InvalidResponse(format!("HTTP {}: {}", status, error_text)),
        })
    }
}

#[async_trait]
impl WebSearch for ExaClient {
    type Error = SearchError;

    async fn search(&self, query: &str, num_results: usize) -> Result<Vec<SearchHit>, Self::Error> {
        let body = SearchRequest {
            query,
            search_type: "auto",
            num_results,
            contents: Contents {
                text: true,
                livecrawl: "always",
            },
        };

        let mut attempts = 0;
        loop {
            attempts += 1;
            match self.attempt(&body).await {
                Ok(mut hits) => {
                    hits.truncate(num_results);
                    debug!(attempts, hits = hits.len(), "Search complete");
                    return Ok(hits);
                }
                Err(e) if e.is_retryable() && should_retry(attempts, self.max_retries) => {
                    let delay = backoff_delay(attempts);
                    warn!(attempt = attempts, error = %e, ?delay, "Search failed, retrying");
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
