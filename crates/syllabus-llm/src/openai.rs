//! OpenAI-compatible Provider Implementation
//!
//! Talks to any server exposing the `/chat/completions` endpoint of the
//! OpenAI API (OpenAI itself, or a compatible gateway).
//!
//! # Features
//!
//! - Async HTTP communication via reqwest
//! - JSON-object response mode
//! - Retry logic with exponential backoff on rate limits and server errors
//! - Timeout handling
//!
//! # Examples
//!
//! ```no_run
//! use syllabus_llm::OpenAiProvider;
//!
//! let provider = OpenAiProvider::from_env("OPENAI_API_KEY").unwrap();
//! ```

use crate::{CompletionRequest, LlmError, LlmProvider};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Default API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";

/// Default model
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default timeout for LLM requests (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default number of retry attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// OpenAI-compatible chat completions provider
pub struct OpenAiProvider {
    endpoint: String,
    model: String,
    api_key: Option<String>,
    api_key_env: String,
    client: reqwest::Client,
    max_retries: u32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

fn build_body<'a>(model: &'a str, request: &'a CompletionRequest) -> ChatRequest<'a> {
    ChatRequest {
        model,
        messages: [
            ChatMessage {
                role: "system",
                content: &request.system,
            },
            ChatMessage {
                role: "user",
                content: &request.user,
            },
        ],
        temperature: request.temperature,
        response_format: request.json_mode.then_some(ResponseFormat {
            kind: "json_object",
        }),
    }
}

/// Pull the first choice's content out of a chat completions response body
fn parse_chat_response(body: &str) -> Result<String, LlmError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| LlmError::InvalidResponse("Response contained no message content".to_string()))
}

impl OpenAiProvider {
    /// Create a new provider
    ///
    /// # Parameters
    ///
    /// - `endpoint`: API base URL (e.g., "https://api.openai.com/v1")
    /// - `model`: Model to use (e.g., "gpt-4o-mini")
    /// - `api_key`: Bearer token; `None` makes every call fail with
    ///   [`LlmError::MissingApiKey`]
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            api_key_env: "OPENAI_API_KEY".to_string(),
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    /// Create a provider with the default endpoint and model, reading the key
    /// from the named environment variable
    ///
    /// A missing variable is not an error here; it is reported on first use.
    pub fn from_env(api_key_env: &str) -> Result<Self, LlmError> {
        let api_key = std::env::var(api_key_env).ok();
        Ok(Self::new(DEFAULT_ENDPOINT, DEFAULT_MODEL, api_key)?.with_api_key_env(api_key_env))
    }

    /// Name of the environment variable the key came from, for error messages
    pub fn with_api_key_env(mut self, api_key_env: impl Into<String>) -> Self {
        self.api_key_env = api_key_env.into();
        self
    }

    /// Set the maximum number of retry attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Replace the HTTP timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, LlmError> {
        self.client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;
        Ok(self)
    }

    /// Whether an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    async fn send_once(&self, api_key: &str, body: &ChatRequest<'_>) -> Result<String, Attempt> {
        let url = format!("{}/chat/completions", self.endpoint);

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| Attempt::Retry(LlmError::Communication(format!("Request failed: {}", e))))?;

        let status = response.status();
        if status.is_success() {
            let text = response
                .text()
                .await
                .map_err(|e| Attempt::Fatal(LlmError::Communication(format!("Failed to read body: {}", e))))?;
            return parse_chat_response(&text).map_err(Attempt::Fatal);
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        match status {
            reqwest::StatusCode::NOT_FOUND => Err(Attempt::Fatal(LlmError::ModelNotAvailable(self.model.clone()))),
            reqwest::StatusCode::TOO_MANY_REQUESTS => Err(Attempt::Retry(LlmError::RateLimitExceeded)),
            s if s.is_server_error() => Err(Attempt::Retry(LlmError::Communication(format!(
                "HTTP {}: {}",
                s, error_text
            )))),
            s => Err(Attempt::Fatal(LlmError::Communication(format!(
                "HTTP {}: {}",
                s, error_text
            )))),
        }
    }
}

/// Whether a failed attempt is worth repeating
enum Attempt {
    Retry(LlmError),
    Fatal(LlmError),
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| LlmError::MissingApiKey(self.api_key_env.clone()))?;

        let body = build_body(&self.model, request);
        debug!(
            "Sending completion request to {} (model {}, {} chars)",
            self.endpoint,
            self.model,
            request.system.len() + request.user.len()
        );

        // Retry logic with exponential backoff
        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self.send_once(api_key, &body).await {
                Ok(content) => return Ok(content),
                Err(Attempt::Fatal(e)) => return Err(e),
                Err(Attempt::Retry(e)) => {
                    warn!("Completion attempt {} failed: {}", attempts + 1, e);
                    last_error = Some(e);
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: 1s, 2s, 4s, etc.
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error.unwrap_or_else(|| {
            LlmError::Communication("Max retries exceeded".to_string())
        }))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
