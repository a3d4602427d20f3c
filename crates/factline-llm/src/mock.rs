//! Deterministic mock provider

use crate::LlmError;
use async_trait::async_trait;
use factline_domain::traits::TextGenerator;
use factline_domain::StructuredSchema;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

#[derive(Debug, Clone)]
enum Reply {
    Text(String),
    Fail(String),
}

#[derive(Debug, Default)]
struct MockState {
    rules: Vec<(String, Reply)>,
    prompts: Vec<String>,
}

/// Mock LLM provider for deterministic testing
///
/// Replies are chosen by the first registered substring found in the prompt,
/// falling back to a default response. No network calls are made.
///
/// # Examples
///
/// ```
/// use factline_llm::MockProvider;
/// use factline_domain::traits::TextGenerator;
/// use factline_domain::StructuredSchema;
///
/// # async fn example() {
/// let schema = StructuredSchema::new("any", serde_json::json!({}));
/// let mut provider = MockProvider::default();
/// provider.add_response("Eiffel", r#"{"status": "supported"}"#);
/// provider.add_error("Moon");
///
/// let reply = provider.generate_structured("Claim: Eiffel Tower", &schema).await;
/// assert_eq!(reply.unwrap(), r#"{"status": "supported"}"#);
/// assert!(provider.generate_structured("Claim: Moon landing", &schema).await.is_err());
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    delay: Option<Duration>,
    state: Arc<Mutex<MockState>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            delay: None,
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    /// Reply with `response` whenever the prompt contains `needle`
    pub fn add_response(&mut self, needle: impl Into<String>, response: impl Into<String>) {
        self.state()
            .rules
            .push((needle.into(), Reply::Text(response.into())));
    }

    /// Fail whenever the prompt contains `needle`
    pub fn add_error(&mut self, needle: impl Into<String>) {
        let needle = needle.into();
        let message = format!("Mock error for prompt containing {:?}", needle);
        self.state().rules.push((needle, Reply::Fail(message)));
    }

    /// Sleep before every reply
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Get the number of times the provider was called
    pub fn call_count(&self) -> usize {
        self.state().prompts.len()
    }

    /// Prompts received so far, in call order
    pub fn prompts(&self) -> Vec<String> {
        self.state().prompts.clone()
    }

    /// Reset the call history
    pub fn reset_call_count(&self) {
        self.state().prompts.clear();
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn reply_for(&self, prompt: &str) -> Reply {
        let mut state = self.state();
        state.prompts.push(prompt.to_string());
        state
            .rules
            .iter()
            .find(|(needle, _)| prompt.contains(needle.as_str()))
            .map(|(_, reply)| reply.clone())
            .unwrap_or_else(|| Reply::Text(self.default_response.clone()))
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("{}")
    }
}

#[async_trait]
impl TextGenerator for MockProvider {
    type Error = LlmError;

    async fn generate_structured(
        &self,
        prompt: &str,
        _schema: &StructuredSchema,
    ) -> Result<String, Self::Error> {
        let reply = self.reply_for(prompt);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match reply {
            Reply::Text(text) => Ok(text),
            Reply::Fail(message) => Err(LlmError::Other(message)),
        }
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> StructuredSchema {
        StructuredSchema::new("test", json!({"type": "object"}))
    }

    #[tokio::test]
    async fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let result = provider.generate_structured("any prompt", &schema()).await;
        assert_eq!(result.unwrap(), "Test response");
    }

    #[tokio::test]
    async fn test_mock_provider_substring_rules() {
        let mut provider = MockProvider::default();
        provider.add_response("hello", "world");
        provider.add_response("foo", "bar");

        let s = schema();
        assert_eq!(provider.generate_structured("say hello", &s).await.unwrap(), "world");
        assert_eq!(provider.generate_structured("a foo b", &s).await.unwrap(), "bar");
        assert_eq!(provider.generate_structured("unknown", &s).await.unwrap(), "{}");
    }

    #[tokio::test]
    async fn test_mock_provider_first_rule_wins() {
        let mut provider = MockProvider::default();
        provider.add_response("tower", "first");
        provider.add_response("Eiffel tower", "second");

        let reply = provider.generate_structured("Eiffel tower", &schema()).await;
        assert_eq!(reply.unwrap(), "first");
    }

    #[tokio::test]
    async fn test_mock_provider_call_count() {
        let provider = MockProvider::new("test");
        let s = schema();

        assert_eq!(provider.call_count(), 0);
        provider.generate_structured("prompt1", &s).await.unwrap();
        provider.generate_structured("prompt2", &s).await.unwrap();
        assert_eq!(provider.call_count(), 2);
        assert_eq!(provider.prompts(), vec!["prompt1", "prompt2"]);

        provider.reset_call_count();
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_provider_error() {
        let mut provider = MockProvider::default();
        provider.add_error("bad prompt");

        let result = provider.generate_structured("a bad prompt", &schema()).await;
        assert!(matches!(result, Err(LlmError::Other(_))));
    }

    #[tokio::test]
    async fn test_mock_provider_clone_shares_history() {
        let provider1 = MockProvider::new("test");
        let provider2 = provider1.clone();

        provider1.generate_structured("test", &schema()).await.unwrap();

        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }
}
