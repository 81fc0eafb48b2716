//! Syllabus LLM Provider Layer
//!
//! Pluggable LLM provider implementations behind the [`LlmProvider`] trait.
//! The extraction orchestrator only sees this trait, so the text analysis
//! backend is opaque to the rest of the workspace.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OpenAiProvider`: OpenAI-compatible chat completions API
//!
//! # Examples
//!
//! ```
//! use syllabus_llm::{CompletionRequest, LlmProvider, MockProvider};
//!
//! # async fn example() {
//! let provider = MockProvider::new(r#"{"assignments": []}"#);
//! let request = CompletionRequest::new("system", "user");
//! let result = provider.complete(&request).await.unwrap();
//! assert_eq!(result, r#"{"assignments": []}"#);
//! # }
//! ```

#![warn(missing_docs)]

pub mod openai;

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use thiserror::Error;

pub use openai::OpenAiProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Credentials are missing; no request was attempted
    #[error("Missing API key: environment variable {0} is not set")]
    MissingApiKey(String),

    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

impl LlmError {
    /// Whether this is a configuration problem rather than a call failure
    ///
    /// Configuration errors are fatal to every extraction attempt and are not
    /// retried.
    pub fn is_configuration(&self) -> bool {
        matches!(self, LlmError::MissingApiKey(_))
    }
}

/// A single chat-style completion request
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// System instructions
    pub system: String,

    /// User message carrying the document text
    pub user: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Ask the provider to return a JSON object
    pub json_mode: bool,
}

impl CompletionRequest {
    /// Create a JSON-mode request with a low temperature
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            temperature: 0.1,
            json_mode: true,
        }
    }

    /// Override the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Trait for LLM provider operations
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Run one completion and return the raw response text
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError>;

    /// Name of the model answering requests
    fn model_name(&self) -> &str;
}

/// Mock LLM provider for deterministic testing
///
/// This provider returns pre-configured responses without making any network
/// calls. Responses can be keyed on the request's user message.
///
/// # Examples
///
/// ```
/// use syllabus_llm::{CompletionRequest, LlmProvider, MockProvider};
///
/// # async fn example() {
/// let mut provider = MockProvider::default();
/// provider.add_response("syllabus one", "{}");
/// provider.add_error("syllabus two");
///
/// let ok = provider.complete(&CompletionRequest::new("sys", "syllabus one")).await;
/// assert_eq!(ok.unwrap(), "{}");
/// let err = provider.complete(&CompletionRequest::new("sys", "syllabus two")).await;
/// assert!(err.is_err());
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, MockReply>>>,
    call_count: Arc<Mutex<usize>>,
    delay: Option<Duration>,
}

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Error,
    MissingKey,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all requests
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
            delay: None,
        }
    }

    /// Sleep before answering, to exercise caller timeouts
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Add a specific response for requests whose user message contains `needle`
    pub fn add_response(&mut self, needle: impl Into<String>, response: impl Into<String>) {
        lock(&self.responses).insert(needle.into(), MockReply::Text(response.into()));
    }

    /// Configure to fail requests whose user message contains `needle`
    pub fn add_error(&mut self, needle: impl Into<String>) {
        lock(&self.responses).insert(needle.into(), MockReply::Error);
    }

    /// Configure to report missing credentials for matching requests
    pub fn add_missing_key(&mut self, needle: impl Into<String>) {
        lock(&self.responses).insert(needle.into(), MockReply::MissingKey);
    }

    /// Get the number of times complete was called
    pub fn call_count(&self) -> usize {
        *lock(&self.call_count)
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *lock(&self.call_count) = 0;
    }

    fn reply_for(&self, user: &str) -> Result<String, LlmError> {
        let responses = lock(&self.responses);
        let matched = responses
            .iter()
            .filter(|(needle, _)| user.contains(needle.as_str()))
            .max_by_key(|(needle, _)| needle.len())
            .map(|(_, reply)| reply.clone());

        match matched {
            Some(MockReply::Text(text)) => Ok(text),
            Some(MockReply::Error) => Err(LlmError::Other("Mock error".to_string())),
            Some(MockReply::MissingKey) => Err(LlmError::MissingApiKey("MOCK_API_KEY".to_string())),
            None => Ok(self.default_response.clone()),
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        *lock(&self.call_count) += 1;

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.reply_for(&request.user)
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(user: &str) -> CompletionRequest {
        CompletionRequest::new("system", user)
    }

    #[tokio::test]
    async fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let result = provider.complete(&request("any prompt")).await;
        assert_eq!(result.unwrap(), "Test response");
    }

    #[tokio::test]
    async fn test_mock_provider_specific_responses() {
        let mut provider = MockProvider::default();
        provider.add_response("hello", "world");
        provider.add_response("foo", "bar");

        assert_eq!(provider.complete(&request("say hello")).await.unwrap(), "world");
        assert_eq!(provider.complete(&request("foo!")).await.unwrap(), "bar");
        assert_eq!(
            provider.complete(&request("unknown")).await.unwrap(),
            "Default mock response"
        );
    }

    #[tokio::test]
    async fn test_mock_provider_longest_match_wins() {
        let mut provider = MockProvider::default();
        provider.add_response("cs101", "short");
        provider.add_response("cs101-fall", "long");

        assert_eq!(provider.complete(&request("file cs101-fall")).await.unwrap(), "long");
    }

    #[tokio::test]
    async fn test_mock_provider_call_count() {
        let provider = MockProvider::new("test");
        assert_eq!(provider.call_count(), 0);

        provider.complete(&request("one")).await.unwrap();
        provider.complete(&request("two")).await.unwrap();
        assert_eq!(provider.call_count(), 2);

        provider.reset_call_count();
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_provider_errors() {
        let mut provider = MockProvider::default();
        provider.add_error("bad");
        provider.add_missing_key("nokey");

        let err = provider.complete(&request("bad prompt")).await.unwrap_err();
        assert!(matches!(err, LlmError::Other(_)));
        assert!(!err.is_configuration());

        let err = provider.complete(&request("nokey")).await.unwrap_err();
        assert!(err.is_configuration());
    }

    #[tokio::test]
    async fn test_mock_provider_clone_shares_count() {
        let provider1 = MockProvider::new("test");
        let provider2 = provider1.clone();

        provider1.complete(&request("x")).await.unwrap();
        assert_eq!(provider2.call_count(), 1);
    }

    #[test]
    fn test_completion_request_defaults() {
        let request = CompletionRequest::new("s", "u").with_temperature(0.5);
        assert!(request.json_mode);
        assert_eq!(request.temperature, 0.5);
    }
}
