//! Error types for the CLI application.

use syllabus_extractor::ExtractorError;
use syllabus_llm::LlmError;
use syllabus_server::config::ConfigError;
use syllabus_server::ServerError;
use syllabus_store::StoreError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Nothing to work on yet
    #[error("{0}")]
    NotFound(String),

    /// Extraction error
    #[error(transparent)]
    Extractor(#[from] ExtractorError),

    /// Storage error
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// LLM setup error
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// Server error
    #[error(transparent)]
    Server(#[from] ServerError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}
