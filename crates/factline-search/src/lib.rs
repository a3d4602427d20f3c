//! Factline Web Search Layer
//!
//! Implementations of the `WebSearch` trait from `factline-domain`.
//!
//! # Clients
//!
//! - `ExaClient`: Exa `/search` API with page text included
//! - `MockSearch`: Deterministic, scriptable search for testing
//!
//! Both return hits in the service's own ranking order; excerpting and
//! numbering happen in the pipeline.

#![warn(missing_docs)]

pub mod exa;
pub mod mock;
pub mod settings;

use std::time::Duration;
use thiserror::Error;

pub use exa::ExaClient;
pub use mock::MockSearch;
pub use settings::SearchSettings;

/// Errors that can occur during search operations
#[derive(Error, Debug)]
pub enum SearchError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Response body did not match the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// The API key was rejected
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The request did not complete in time
    #[error("Request timed out")]
    Timeout,

    /// Client misconfiguration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SearchError {
    /// Whether another attempt could succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SearchError::Communication(_) | SearchError::RateLimitExceeded | SearchError::Timeout
        )
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SearchError::Timeout
        } else {
            SearchError::Communication(format!("Request failed: {}", e))
        }
    }
}

/// Default timeout for search requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of retries after the first attempt
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Exponential backoff before the next attempt: 1s, 2s, 4s, etc.
pub(crate) fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_secs(2u64.pow(attempt.saturating_sub(1).min(6)))
}

/// Whether failed attempt number `attempt` (1-based) may be followed by a retry
pub(crate) fn should_retry(attempt: u32, max_retries: u32) -> bool {
    attempt <= max_retries
}
