//! Core Extractor implementation

use crate::config::ExtractorConfig;
use crate::document::extract_pdf_text;
use crate::error::{ExtractionFailure, ExtractorError};
use crate::parser::parse_llm_response;
use crate::prompt::PromptBuilder;
use crate::types::{BatchReport, Document, DocumentContent, DocumentResult, ProcessedDocument};
use std::fmt::Display;
use std::sync::{Arc, Mutex, MutexGuard};
use syllabus_domain::traits::DeadlineStore;
use syllabus_domain::{DeadlineCollection, DeadlineRecord, ExtractionOutcome, UpsertOutcome};
use syllabus_llm::LlmProvider;
use syllabus_store::record_file_name;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// The Extractor turns syllabus documents into committed deadline records
///
/// The store sits behind a single-writer mutex so that concurrent callers
/// cannot interleave their read-merge-write cycles.
pub struct Extractor<S>
where
    S: DeadlineStore,
{
    llm_provider: Arc<dyn LlmProvider>,
    store: Arc<Mutex<S>>,
    config: ExtractorConfig,
}

impl<S> Extractor<S>
where
    S: DeadlineStore + Send + 'static,
    S::Error: Display,
{
    /// Create a new Extractor that owns its store
    pub fn new(llm_provider: Arc<dyn LlmProvider>, store: S, config: ExtractorConfig) -> Self {
        Self::with_shared_store(llm_provider, Arc::new(Mutex::new(store)), config)
    }

    /// Create a new Extractor over a store shared with other components
    pub fn with_shared_store(
        llm_provider: Arc<dyn LlmProvider>,
        store: Arc<Mutex<S>>,
        config: ExtractorConfig,
    ) -> Self {
        Self {
            llm_provider,
            store,
            config,
        }
    }

    /// Handle to the shared store
    pub fn store(&self) -> Arc<Mutex<S>> {
        Arc::clone(&self.store)
    }

    /// Active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Name of the model behind the extraction service
    pub fn model_name(&self) -> &str {
        self.llm_provider.model_name()
    }

    /// Consistent snapshot of the persisted collection
    ///
    /// `None` means nothing has been processed yet.
    pub fn snapshot(&self) -> Result<Option<DeadlineCollection>, ExtractorError> {
        let store = self.lock_store()?;
        store
            .load_existing()
            .map_err(|e| ExtractorError::Store(e.to_string()))
    }

    /// Run extraction for one document without committing anything
    ///
    /// Extraction failures come back as `ExtractionOutcome::Failed`. Only a
    /// configuration problem is returned as an error.
    pub async fn extract(&self, document: &Document) -> Result<ExtractionOutcome, ExtractorError> {
        info!("Starting extraction for '{}'", document.filename);

        match self.try_extract(document).await {
            Ok(record) => {
                info!(
                    "Extraction complete for '{}': {} assignments, {} exams",
                    record.source_file,
                    record.assignments.len(),
                    record.exams.len()
                );
                Ok(ExtractionOutcome::Extracted(record))
            }
            Err(ExtractionFailure::Llm(e)) if e.is_configuration() => {
                Err(ExtractorError::Config(e.to_string()))
            }
            Err(failure) => {
                warn!("Extraction failed for '{}': {}", document.filename, failure);
                Ok(ExtractionOutcome::failed(
                    document.filename.clone(),
                    failure.to_string(),
                ))
            }
        }
    }

    /// Extract one document and commit the resulting record
    ///
    /// A failed extraction is still committed as an error-marked record, so
    /// reprocessing a document always replaces whatever was there before.
    pub async fn process(&self, document: Document) -> Result<ProcessedDocument, ExtractorError> {
        let outcome = self.extract(&document).await?;
        let record = outcome.clone().into_record();
        let upsert = self.commit(record.clone())?;
        let output_file = record_file_name(&record.source_file);

        Ok(ProcessedDocument {
            outcome,
            record,
            upsert,
            output_file,
        })
    }

    /// Process one document as a batch item
    ///
    /// A store failure only affects this document and comes back as a failed
    /// result. A configuration error is returned, since every later document
    /// would hit it too.
    pub async fn process_item(&self, document: Document) -> Result<DocumentResult, ExtractorError> {
        let filename = document.filename.clone();
        match self.process(document).await {
            Ok(processed) => Ok(DocumentResult::from_processed(&processed)),
            Err(ExtractorError::Store(e)) => {
                warn!("Could not store deadlines for '{}': {}", filename, e);
                Ok(DocumentResult::failed(filename, format!("Store error: {}", e)))
            }
            Err(e) => Err(e),
        }
    }

    /// Process documents one after another
    ///
    /// Individual failures, including store failures, are reported per
    /// document and never stop the batch. A configuration error does.
    pub async fn process_batch(
        &self,
        documents: Vec<Document>,
    ) -> Result<BatchReport, ExtractorError> {
        let mut report = BatchReport::new();

        for document in documents {
            report.push(self.process_item(document).await?);
        }

        info!(
            "Batch complete: {} processed, {} failed of {}",
            report.processed, report.failed, report.total_files
        );

        Ok(report)
    }

    async fn try_extract(&self, document: &Document) -> Result<DeadlineRecord, ExtractionFailure> {
        let text = self.document_text(document).await?;

        if text.trim().is_empty() {
            return Err(ExtractionFailure::EmptyText);
        }

        let length = text.chars().count();
        if length > self.config.max_text_length {
            return Err(ExtractionFailure::TextTooLong(length, self.config.max_text_length));
        }

        let request = PromptBuilder::new(text, document.filename.clone())
            .with_temperature(self.config.temperature)
            .build();

        debug!("Prompt length: {} chars", request.user.len());

        let response = timeout(
            self.config.extraction_timeout(),
            self.llm_provider.complete(&request),
        )
        .await
        .map_err(|_| ExtractionFailure::Timeout(self.config.extraction_timeout_secs))??;

        debug!("LLM response length: {} chars", response.len());

        parse_llm_response(&response, &document.filename)
    }

    async fn document_text(&self, document: &Document) -> Result<String, ExtractionFailure> {
        match &document.content {
            DocumentContent::Text(text) => Ok(text.clone()),
            DocumentContent::Pdf(bytes) => {
                let bytes = bytes.clone();
                tokio::task::spawn_blocking(move || extract_pdf_text(&bytes))
                    .await
                    .map_err(|e| ExtractionFailure::Document(e.to_string()))?
                    .map_err(ExtractionFailure::Document)
            }
        }
    }

    fn commit(&self, record: DeadlineRecord) -> Result<UpsertOutcome, ExtractorError> {
        let source_file = record.source_file.clone();
        let mut store = self.lock_store()?;
        let upsert = store
            .upsert(record)
            .map_err(|e| ExtractorError::Store(e.to_string()))?;

        info!("Stored deadlines for '{}' ({:?})", source_file, upsert);
        Ok(upsert)
    }

    fn lock_store(&self) -> Result<MutexGuard<'_, S>, ExtractorError> {
        self.store
            .lock()
            .map_err(|e| ExtractorError::Store(format!("Lock poisoned: {}", e)))
    }
}
