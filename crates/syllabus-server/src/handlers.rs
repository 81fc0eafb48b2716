//! HTTP request handlers for the server.
//!
//! Implements the upload, calendar, deadline listing and health endpoints
//! using axum.

use crate::config::AppConfig;
use axum::{
    body::Bytes,
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, State},
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router as AxumRouter,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use syllabus_calendar::Materializer;
use syllabus_domain::{DeadlineCollection, DeadlineRecord};
use syllabus_extractor::{BatchReport, Document, DocumentResult, Extractor, ExtractorError};
use syllabus_store::{write_atomic, JsonFileStore, StoreError};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Message returned when nothing has been processed yet
pub const NO_DEADLINES_MESSAGE: &str = "No deadlines found. Please process PDF files first.";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Orchestrator over the on-disk deadline store
    pub extractor: Arc<Extractor<JsonFileStore>>,
    /// Calendar materializer
    pub materializer: Arc<Materializer>,
    /// Server configuration
    pub config: Arc<AppConfig>,
}

/// Service description returned by `GET /`
#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceInfo {
    /// Always "running"
    pub status: String,
    /// Service name
    pub message: String,
    /// Crate version
    pub version: String,
    /// Route → description
    pub endpoints: BTreeMap<String, String>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall health status
    pub status: String,
    /// Model used for extraction
    pub model: String,
}

/// Response for a single upload
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Whether extraction produced a usable record
    pub success: bool,
    /// Sanitized file name
    pub filename: String,
    /// The committed record
    pub deadlines: DeadlineRecord,
    /// Per-document JSON file name
    pub output_file: String,
    /// Extraction failure, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response for a multi-file upload
#[derive(Debug, Serialize)]
pub struct BatchResponse {
    /// The request itself was handled
    pub success: bool,
    /// Tallies and per-file results
    #[serde(flatten)]
    pub report: BatchReport,
}

/// Response for `GET /deadlines`
#[derive(Debug, Serialize)]
pub struct DeadlinesResponse {
    /// Always true
    pub success: bool,
    /// Every stored record
    pub deadlines: DeadlineCollection,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Malformed or unacceptable request
    BadRequest(String),
    /// Precondition not met (nothing processed yet)
    NotFound(String),
    /// Multipart body could not be read (including size limit)
    Multipart(MultipartError),
    /// Orchestrator error
    Extractor(ExtractorError),
    /// Internal server error
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Multipart(e) => (e.status(), e.body_text()),
            AppError::Extractor(e @ ExtractorError::Config(_)) => {
                (StatusCode::SERVICE_UNAVAILABLE, e.to_string())
            }
            AppError::Extractor(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            AppError::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        if status.is_server_error() {
            warn!("Request failed with {}: {}", status, message);
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        AppError::Multipart(e)
    }
}

impl From<ExtractorError> for AppError {
    fn from(e: ExtractorError) -> Self {
        AppError::Extractor(e)
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::InternalError(e.to_string())
    }
}

/// Reduce an uploaded file name to a safe, flat name
///
/// Path separators become word breaks, whitespace runs become `_`, anything
/// outside `[A-Za-z0-9._-]` is dropped, and leading or trailing dots and
/// underscores are stripped. May return an empty string.
pub fn secure_filename(name: &str) -> String {
    let flattened = name.replace(['/', '\\'], " ");
    let joined = flattened.split_whitespace().collect::<Vec<_>>().join("_");
    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();
    kept.trim_matches(|c| c == '.' || c == '_').to_string()
}

struct UploadedFile {
    filename: String,
    bytes: Bytes,
}

/// Collect every file part with the given field name
async fn read_files(multipart: &mut Multipart, field_name: &str) -> Result<Vec<UploadedFile>, AppError> {
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(field_name) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;
        files.push(UploadedFile { filename, bytes });
    }

    Ok(files)
}

fn rejection_reason(config: &AppConfig, filename: &str) -> Option<String> {
    if !config.is_allowed(filename) {
        return Some(format!(
            "Invalid file type (allowed: {})",
            config.allowed_extensions.join(", ")
        ));
    }
    // Sanitizing can strip the name down to a bare extension
    if !config.is_allowed(&secure_filename(filename)) {
        return Some("Invalid file name".to_string());
    }
    None
}

fn stored_collection(state: &AppState) -> Result<DeadlineCollection, AppError> {
    state
        .extractor
        .snapshot()?
        .ok_or_else(|| AppError::NotFound(NO_DEADLINES_MESSAGE.to_string()))
}

/// GET / - Service description
async fn service_info() -> Json<ServiceInfo> {
    let endpoints = [
        ("POST /upload", "Upload and process a PDF syllabus"),
        ("POST /process-multiple", "Upload and process multiple PDF syllabi"),
        ("GET /calendar", "Generate and download ICS calendar file"),
        ("GET /deadlines", "Get all extracted deadlines as JSON"),
        ("GET /health", "Health check"),
    ]
    .into_iter()
    .map(|(route, description)| (route.to_string(), description.to_string()))
    .collect();

    Json(ServiceInfo {
        status: "running".to_string(),
        message: "Syllabus Scheduler API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints,
    })
}

/// GET /health - Liveness check
async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        model: state.extractor.model_name().to_string(),
    })
}

/// POST /upload - Process one file from the `file` field
async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let file = read_files(&mut multipart, "file")
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| AppError::BadRequest("No file part in the request".to_string()))?;

    if file.filename.is_empty() {
        return Err(AppError::BadRequest("No file selected".to_string()));
    }
    if let Some(reason) = rejection_reason(&state.config, &file.filename) {
        return Err(AppError::BadRequest(reason));
    }

    let filename = secure_filename(&file.filename);
    info!("Received upload '{}' ({} bytes)", filename, file.bytes.len());

    let processed = state
        .extractor
        .process(Document::from_upload(filename.clone(), file.bytes.to_vec()))
        .await?;

    Ok(Json(UploadResponse {
        success: processed.is_success(),
        filename,
        error: processed.outcome.failure_reason().map(str::to_string),
        deadlines: processed.record,
        output_file: processed.output_file,
    }))
}

/// POST /process-multiple - Process every file in the `files` field
///
/// Files with a rejected extension are reported and skipped; the rest are
/// processed one after another. Results keep submission order, and a file
/// that cannot be stored is reported without stopping the others.
async fn process_multiple(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<BatchResponse>, AppError> {
    let files = read_files(&mut multipart, "files").await?;

    match files.first() {
        None => return Err(AppError::BadRequest("No files in the request".to_string())),
        Some(first) if first.filename.is_empty() => {
            return Err(AppError::BadRequest("No files selected".to_string()))
        }
        Some(_) => {}
    }

    let mut report = BatchReport::new();
    for file in files {
        if let Some(reason) = rejection_reason(&state.config, &file.filename) {
            warn!("Rejected upload '{}': {}", file.filename, reason);
            report.push(DocumentResult::rejected(file.filename, reason));
            continue;
        }

        let document = Document::from_upload(secure_filename(&file.filename), file.bytes.to_vec());
        report.push(state.extractor.process_item(document).await?);
    }

    info!(
        "Processed {} of {} uploaded files ({} failed)",
        report.processed, report.total_files, report.failed
    );

    Ok(Json(BatchResponse {
        success: true,
        report,
    }))
}

/// GET /calendar - Render the stored deadlines as an `.ics` download
async fn calendar(State(state): State<AppState>) -> Result<Response, AppError> {
    let collection = stored_collection(&state)?;
    let (materialization, ics) = state.materializer.render(&collection);

    write_atomic(&state.config.schedule_path(), ics.as_bytes())?;

    info!(
        "Generated calendar with {} events ({} skipped)",
        materialization.event_count(),
        materialization.skipped_count()
    );

    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        state.config.download_name
    ))
    .map_err(|e| AppError::InternalError(format!("Invalid download name: {}", e)))?;

    let headers = [
        (
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/calendar; charset=utf-8"),
        ),
        (header::CONTENT_DISPOSITION, disposition),
        (
            HeaderName::from_static("x-event-count"),
            HeaderValue::from(materialization.event_count()),
        ),
        (
            HeaderName::from_static("x-skipped-count"),
            HeaderValue::from(materialization.skipped_count()),
        ),
    ];

    Ok((headers, ics).into_response())
}

/// GET /deadlines - Every stored record
async fn deadlines(State(state): State<AppState>) -> Result<Json<DeadlinesResponse>, AppError> {
    let collection = stored_collection(&state)?;
    Ok(Json(DeadlinesResponse {
        success: true,
        deadlines: collection,
    }))
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> AxumRouter {
    let body_limit = state.config.max_upload_bytes;

    AxumRouter::new()
        .route("/", get(service_info))
        .route("/health", get(health_check))
        .route("/upload", post(upload))
        .route("/process-multiple", post(process_multiple))
        .route("/calendar", get(calendar))
        .route("/deadlines", get(deadlines))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
