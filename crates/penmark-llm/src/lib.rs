//! Penmark LLM Provider Layer
//!
//! Pluggable implementations of the `LlmProvider` trait from `penmark-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `GeminiProvider`: Google Gemini `generateContent` API
//!
//! # Examples
//!
//! ```
//! use penmark_llm::MockProvider;
//! use penmark_domain::LlmProvider;
//! use serde_json::json;
//!
//! # async fn example() {
//! let provider = MockProvider::new("{}");
//! let result = provider.generate_structured("prompt", &json!({})).await.unwrap();
//! assert_eq!(result, "{}");
//! # }
//! ```

#![warn(missing_docs)]

pub mod gemini;

use async_trait::async_trait;
use penmark_domain::LlmProvider;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use thiserror::Error;

pub use gemini::GeminiProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// The backend rejected the credential
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Invalid response envelope from the backend
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit or quota exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            LlmError::Communication(format!("Request timed out: {}", e))
        } else if e.is_decode() {
            LlmError::InvalidResponse(format!("Failed to decode response: {}", e))
        } else {
            LlmError::Communication(format!("Request failed: {}", e))
        }
    }
}

#[derive(Debug, Default)]
struct MockState {
    responses: HashMap<String, Result<String, LlmError>>,
    call_count: usize,
    last_prompt: Option<String>,
    last_schema: Option<Value>,
}

/// Mock LLM provider for deterministic testing
///
/// This provider returns pre-configured responses without making any network
/// calls. It records every prompt and schema it receives.
///
/// # Examples
///
/// ```
/// use penmark_llm::{LlmError, MockProvider};
///
/// // Fixed response for every prompt
/// let provider = MockProvider::new("Fixed response");
///
/// // Per-prompt responses and failures
/// let mut provider = MockProvider::default();
/// provider.add_response("prompt1", "response1");
/// provider.add_error("prompt2", LlmError::Auth("bad key".to_string()));
/// assert_eq!(provider.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: Result<String, LlmError>,
    delay: Option<Duration>,
    state: Arc<Mutex<MockState>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: Ok(response.into()),
            delay: None,
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    /// Create a MockProvider that fails every call with `error`
    pub fn failing(error: LlmError) -> Self {
        Self {
            default_response: Err(error),
            delay: None,
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    /// Hold every call for `delay` before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Add a specific response for a given prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        self.state()
            .responses
            .insert(prompt.into(), Ok(response.into()));
    }

    /// Configure to return an error for a specific prompt
    pub fn add_error(&mut self, prompt: impl Into<String>, error: LlmError) {
        self.state().responses.insert(prompt.into(), Err(error));
    }

    /// Get the number of times the provider was called
    pub fn call_count(&self) -> usize {
        self.state().call_count
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        self.state().call_count = 0;
    }

    /// The prompt received by the most recent call
    pub fn last_prompt(&self) -> Option<String> {
        self.state().last_prompt.clone()
    }

    /// The schema received by the most recent call
    pub fn last_schema(&self) -> Option<Value> {
        self.state().last_schema.clone()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    type Error = LlmError;

    async fn generate_structured(&self, prompt: &str, schema: &Value) -> Result<String, Self::Error> {
        let response = {
            let mut state = self.state();
            state.call_count += 1;
            state.last_prompt = Some(prompt.to_string());
            state.last_schema = Some(schema.clone());
            state
                .responses
                .get(prompt)
                .cloned()
                .unwrap_or_else(|| self.default_response.clone())
        };

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let result = provider.generate_structured("any prompt", &json!({})).await;
        assert_eq!(result.unwrap(), "Test response");
    }

    #[tokio::test]
    async fn test_mock_provider_specific_responses() {
        let mut provider = MockProvider::default();
        provider.add_response("hello", "world");
        provider.add_response("foo", "bar");

        let schema = json!({});
        assert_eq!(provider.generate_structured("hello", &schema).await.unwrap(), "world");
        assert_eq!(provider.generate_structured("foo", &schema).await.unwrap(), "bar");
        assert_eq!(
            provider.generate_structured("unknown", &schema).await.unwrap(),
            "Default mock response"
        );
    }

    #[tokio::test]
    async fn test_mock_provider_call_count() {
        let provider = MockProvider::new("test");
        let schema = json!({});

        assert_eq!(provider.call_count(), 0);

        provider.generate_structured("prompt1", &schema).await.unwrap();
        assert_eq!(provider.call_count(), 1);

        provider.generate_structured("prompt2", &schema).await.unwrap();
        assert_eq!(provider.call_count(), 2);

        provider.reset_call_count();
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_provider_error() {
        let mut provider = MockProvider::default();
        provider.add_error("bad prompt", LlmError::RateLimitExceeded);

        let result = provider.generate_structured("bad prompt", &json!({})).await;
        assert_eq!(result.unwrap_err(), LlmError::RateLimitExceeded);
    }

    #[tokio::test]
    async fn test_mock_provider_failing() {
        let provider = MockProvider::failing(LlmError::Auth("invalid key".to_string()));
        let result = provider.generate_structured("prompt", &json!({})).await;
        assert!(matches!(result, Err(LlmError::Auth(_))));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_provider_records_prompt_and_schema() {
        let provider = MockProvider::new("ok");
        let schema = json!({"type": "OBJECT"});
        provider.generate_structured("the prompt", &schema).await.unwrap();

        assert_eq!(provider.last_prompt().as_deref(), Some("the prompt"));
        assert_eq!(provider.last_schema(), Some(schema));
    }

    #[tokio::test]
    async fn test_mock_provider_clone_shares_state() {
        let provider1 = MockProvider::new("test");
        let provider2 = provider1.clone();

        provider1.generate_structured("test", &json!({})).await.unwrap();

        // Both should share the same call count due to Arc
        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }
}
