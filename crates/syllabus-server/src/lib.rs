//! Syllabus Server
//!
//! HTTP front end for the syllabus scheduler: accepts syllabus uploads, runs
//! them through the extractor, and serves the resulting deadlines as JSON or
//! as an iCalendar download.
//!
//! Tracing is initialised by the binaries, not here.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use config::{AppConfig, ConfigError};
use handlers::{create_router, AppState};
use std::sync::Arc;
use syllabus_calendar::Materializer;
use syllabus_extractor::Extractor;
use syllabus_llm::{LlmError, LlmProvider};
use syllabus_store::{JsonFileStore, StoreError};
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Data directory could not be prepared
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Extraction service could not be set up
    #[error("LLM setup error: {0}")]
    Llm(#[from] LlmError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Build application state over `config.data_dir` with the given provider
pub fn build_state(config: AppConfig, llm: Arc<dyn LlmProvider>) -> Result<AppState, ServerError> {
    let store = JsonFileStore::new(&config.data_dir)?;
    let extractor = Extractor::new(llm, store, config.extractor.clone());
    let materializer = Materializer::new(config.calendar.clone());

    Ok(AppState {
        extractor: Arc::new(extractor),
        materializer: Arc::new(materializer),
        config: Arc::new(config),
    })
}

/// Start the HTTP server
///
/// Builds the OpenAI-compatible provider from `[llm]`, prepares the data
/// directory and serves until the process is stopped.
pub async fn start_server(config: AppConfig) -> Result<(), ServerError> {
    config.validate()?;

    info!("Starting Syllabus Scheduler server");
    info!("Bind address: {}", config.bind_addr());
    info!("Data directory: {}", config.data_dir.display());
    info!("Model: {} at {}", config.llm.model, config.llm.endpoint);

    let provider = config.llm.build_provider()?;
    if !provider.has_api_key() {
        warn!(
            "{} is not set; uploads will fail until it is configured",
            config.llm.api_key_env
        );
    }

    let bind_addr = config.bind_addr();
    let state = build_state(config, Arc::new(provider))?;
    let app = create_router(state);

    let listener = TcpListener::bind(&bind_addr).await?;
    info!("Server listening on {}", bind_addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}
