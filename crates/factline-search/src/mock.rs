//! Deterministic mock search

use crate::SearchError;
use async_trait::async_trait;
use factline_domain::traits::WebSearch;
use factline_domain::SearchHit;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

#[derive(Debug, Clone)]
enum Outcome {
    Hits(Vec<SearchHit>),
    Fail(String),
    Stall(Duration),
}

#[derive(Debug, Default)]
struct MockState {
    rules: Vec<(String, Outcome)>,
    queries: Vec<String>,
    in_flight: usize,
    peak_in_flight: usize,
}

/// Mock web search for deterministic testing
///
/// Outcomes are chosen by the first registered substring found in the query.
/// Unmatched queries return the default hit list (empty unless set).
///
/// # Examples
///
/// ```
/// use factline_search::MockSearch;
/// use factline_domain::traits::WebSearch;
/// use factline_domain::SearchHit;
///
/// # async fn example() {
/// let mut search = MockSearch::default();
/// search.add_results("Eiffel", vec![SearchHit::new("https://a.example", "324 metres")]);
/// search.add_error("Moon");
///
/// assert_eq!(search.search("How tall is the Eiffel Tower?", 3).await.unwrap().len(), 1);
/// assert!(search.search("Moon landing?", 3).await.is_err());
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockSearch {
    default_hits: Vec<SearchHit>,
    delay: Option<Duration>,
    state: Arc<Mutex<MockState>>,
}

impl MockSearch {
    /// Create a mock returning `hits` for every unmatched query
    pub fn new(hits: Vec<SearchHit>) -> Self {
        Self {
            default_hits: hits,
            delay: None,
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    /// Sleep for `delay` before answering every query
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Return `hits` whenever the query contains `needle`
    pub fn add_results(&mut self, needle: impl Into<String>, hits: Vec<SearchHit>) {
        self.state().rules.push((needle.into(), Outcome::Hits(hits)));
    }

    /// Fail whenever the query contains `needle`
    pub fn add_error(&mut self, needle: impl Into<String>) {
        let needle = needle.into();
        let message = format!("Mock search failure for {:?}", needle);
        self.state().rules.push((needle, Outcome::Fail(message)));
    }

    /// Sleep for `delay` and then return no hits whenever the query contains `needle`
    pub fn add_stall(&mut self, needle: impl Into<String>, delay: Duration) {
        self.state().rules.push((needle.into(), Outcome::Stall(delay)));
    }

    /// Queries received so far, in call order
    pub fn queries(&self) -> Vec<String> {
        self.state().queries.clone()
    }

    /// Number of searches performed
    pub fn call_count(&self) -> usize {
        self.state().queries.len()
    }

    /// Highest number of searches that were running at the same time
    ///
    /// A search dropped before it finishes stays counted as running.
    pub fn peak_in_flight(&self) -> usize {
        self.state().peak_in_flight
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn outcome_for(&self, query: &str) -> Outcome {
        let mut state = self.state();
        state.queries.push(query.to_string());
        state.in_flight += 1;
        state.peak_in_flight = state.peak_in_flight.max(state.in_flight);
        state
            .rules
            .iter()
            .find(|(needle, _)| query.contains(needle.as_str()))
            .map(|(_, outcome)| outcome.clone())
            .unwrap_or_else(|| Outcome::Hits(self.default_hits.clone()))
    }
}

#[async_trait]
impl WebSearch for MockSearch {
    type Error = SearchError;

    async fn search(&self, query: &str, num_results: usize) -> Result<Vec<SearchHit>, Self::Error> {
        let outcome = self.outcome_for(query);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let result = match outcome {
            Outcome::Hits(mut hits) => {
                hits.truncate(num_results);
                Ok(hits)
            }
            Outcome::Fail(message) => Err(SearchError::Communication(message)),
            Outcome::Stall(delay) => {
                tokio::time::sleep(delay).await;
                Ok(Vec::new())
            }
        };
        self.state().in_flight -= 1;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hits(n: usize) -> Vec<SearchHit> {
        (1..=n)
            .map(|i| SearchHit::new(format!("https://s{}.example", i), format!("text {}", i)))
            .collect()
    }

    #[tokio::test]
    async fn test_default_hits_truncated() {
        let search = MockSearch::new(hits(5));
        let result = search.search("anything", 3).await.unwrap();
        assert_eq!(result.len(), 3);
        assert_eq!(result[0].url, "https://s1.example");
    }

    #[tokio::test]
    async fn test_rules_and_call_log() {
        let mut search = MockSearch::default();
        search.add_results("tower", hits(1));
        search.add_error("moon");

        assert_eq!(search.search("tower height?", 3).await.unwrap().len(), 1);
        assert!(matches!(
            search.search("moon landing?", 3).await,
            Err(SearchError::Communication(_))
        ));
        assert!(search.search("other?", 3).await.unwrap().is_empty());
        assert_eq!(search.queries(), vec!["tower height?", "moon landing?", "other?"]);
    }

    #[tokio::test]
    async fn test_stall_returns_empty_after_delay() {
        let mut search = MockSearch::default();
        search.add_stall("slow", Duration::from_millis(10));
        assert!(search.search("slow query", 3).await.unwrap().is_empty());
        assert_eq!(search.call_count(), 1);
    }

    #[tokio::test]
    async fn test_peak_in_flight_counts_overlapping_searches() {
        let search = MockSearch::new(hits(1)).with_delay(Duration::from_millis(50));
        let (a, b) = tokio::join!(search.search("first", 1), search.search("second", 1));
        assert!(a.is_ok() && b.is_ok());
        assert_eq!(search.peak_in_flight(), 2);

        search.search("third", 1).await.unwrap();
        assert_eq!(search.peak_in_flight(), 2);
    }
}
