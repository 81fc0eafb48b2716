//! Error types for the Extractor

use syllabus_llm::LlmError;
use thiserror::Error;

/// Errors that escape the orchestrator
///
/// Extraction failures (bad responses, timeouts, unreadable documents) never
/// appear here; they are folded into error-marked records. Only problems that
/// must stop the caller do.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Extraction service is not configured (e.g. missing credentials)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Deadline store error
    #[error("Store error: {0}")]
    Store(String),
}

/// Reasons a single document's extraction failed
///
/// These are converted to strings on error-marked records.
#[derive(Error, Debug)]
pub(crate) enum ExtractionFailure {
    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// Document text exceeds maximum length
    #[error("Text too long: {0} chars (max: {1})")]
    TextTooLong(usize, usize),

    /// Document contains no text to analyze
    #[error("No text could be extracted from the document")]
    EmptyText,

    /// Document could not be read
    #[error("Document error: {0}")]
    Document(String),

    /// Extraction timeout
    #[error("Extraction timed out after {0} seconds")]
    Timeout(u64),

    /// Response was not the expected JSON shape
    #[error("Invalid response format: {0}")]
    InvalidFormat(String),
}

impl From<serde_json::Error> for ExtractionFailure {
    fn from(e: serde_json::Error) -> Self {
        ExtractionFailure::InvalidFormat(format!("JSON parse error: {}", e))
    }
}
