//! Evidence retrieval for one claim

use crate::config::{RetrieverConfig, SearchInput};
use crate::error::RetrievalError;
use factline_domain::traits::WebSearch;
use factline_domain::{Claim, Source};
use std::sync::Arc;
use tokio::time::timeout;
use tracing::debug;

/// Keep at most `max_chars` characters of `text`
pub fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

/// Fetches a fixed-size, ranked evidence set for each claim
///
/// Results keep the search service's ordering and are numbered 1..=K.
pub struct EvidenceRetriever<W>
where
    W: WebSearch,
{
    search: Arc<W>,
    config: RetrieverConfig,
}

impl<W> EvidenceRetriever<W>
where
    W: WebSearch,
{
    /// Create a new retriever
    pub fn new(search: Arc<W>, config: RetrieverConfig) -> Self {
        Self { search, config }
    }

    /// The active configuration
    pub fn config(&self) -> &RetrieverConfig {
        &self.config
    }

    /// The text sent to the search service for `claim`
    pub fn query_for<'c>(&self, claim: &'c Claim) -> &'c str {
        match self.config.search_input {
            SearchInput::SearchQuery => claim.search_query.trim(),
            SearchInput::ClaimText => claim.claim_text.trim(),
        }
    }

    /// Search for `query` and build the evidence set
    pub async fn retrieve(&self, query: &str) -> Result<Vec<Source>, RetrievalError> {
        let k = self.config.results_per_claim;
        let hits = timeout(self.config.search_timeout(), self.search.search(query, k))
            .await
            .map_err(|_| RetrievalError::Timeout)?
            .map_err(|e| RetrievalError::Search(e.to_string()))?;

        let sources: Vec<Source> = hits
            .into_iter()
            .take(k)
            .zip(1u32..)
            .map(|(hit, source_number)| Source {
                url: hit.url,
                title: hit.title,
                source_number,
                source_text: excerpt(hit.text.as_deref().unwrap_or(""), self.config.excerpt_chars),
            })
            .collect();

        debug!(query, sources = sources.len(), "Evidence retrieved");
        Ok(sources)
    }
}
