//! Request and response types for extraction

use serde::Serialize;
use syllabus_domain::{DeadlineRecord, ExtractionOutcome, UpsertOutcome};

/// A document handed to the orchestrator
#[derive(Debug, Clone)]
pub struct Document {
    /// Provenance name, becomes the record's `source_file`
    pub filename: String,

    /// Document body
    pub content: DocumentContent,
}

/// Body of a document
#[derive(Debug, Clone)]
pub enum DocumentContent {
    /// Raw PDF bytes; text is extracted before analysis
    Pdf(Vec<u8>),

    /// Already-extracted plain text
    Text(String),
}

impl Document {
    /// A PDF document
    pub fn pdf(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content: DocumentContent::Pdf(bytes),
        }
    }

    /// A plain-text document
    pub fn text(filename: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content: DocumentContent::Text(text.into()),
        }
    }

    /// Pick the content kind from the file extension
    ///
    /// `.pdf` is treated as PDF bytes; anything else is decoded as UTF-8 text
    /// (lossily).
    pub fn from_upload(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        let filename = filename.into();
        let is_pdf = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);

        if is_pdf {
            Self::pdf(filename, bytes)
        } else {
            let text = String::from_utf8_lossy(&bytes).into_owned();
            Self::text(filename, text)
        }
    }
}

/// Result of processing and committing one document
#[derive(Debug, Clone)]
pub struct ProcessedDocument {
    /// What extraction produced
    pub outcome: ExtractionOutcome,

    /// The record that was committed (error-marked if extraction failed)
    pub record: DeadlineRecord,

    /// Whether the commit inserted or replaced
    pub upsert: UpsertOutcome,

    /// Name of the per-document JSON file
    pub output_file: String,
}

impl ProcessedDocument {
    /// Whether extraction succeeded
    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }
}

/// Per-document entry in a batch report
#[derive(Debug, Clone, Serialize)]
pub struct DocumentResult {
    /// File name as submitted
    pub filename: String,

    /// Whether the document yielded a usable record
    pub success: bool,

    /// The committed record, if the document reached the orchestrator
    #[serde(rename = "deadlines", skip_serializing_if = "Option::is_none")]
    pub record: Option<DeadlineRecord>,

    /// Failure description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DocumentResult {
    /// Result for a committed document
    pub fn from_processed(processed: &ProcessedDocument) -> Self {
        Self {
            filename: processed.record.source_file.clone(),
            success: processed.is_success(),
            record: Some(processed.record.clone()),
            error: processed.outcome.failure_reason().map(str::to_string),
        }
    }

    /// Result for a document that reached the orchestrator but was not stored
    pub fn failed(filename: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::rejected(filename, reason)
    }

    /// Result for a document that was turned away before extraction
    pub fn rejected(filename: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            success: false,
            record: None,
            error: Some(reason.into()),
        }
    }
}

/// Outcome of a multi-document batch
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// Number of documents submitted
    pub total_files: usize,

    /// Documents that produced a usable record
    pub processed: usize,

    /// Documents that were rejected or failed extraction
    pub failed: usize,

    /// Per-document results in submission order
    pub results: Vec<DocumentResult>,
}

impl BatchReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a result and update the tallies
    pub fn push(&mut self, result: DocumentResult) {
        self.total_files += 1;
        if result.success {
            self.processed += 1;
        } else {
            self.failed += 1;
        }
        self.results.push(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_upload_detects_pdf() {
        let doc = Document::from_upload("CS101.PDF", vec![1, 2, 3]);
        assert!(matches!(doc.content, DocumentContent::Pdf(_)));

        let doc = Document::from_upload("notes.txt", b"HW1 due 2025-09-28".to_vec());
        match doc.content {
            DocumentContent::Text(text) => assert_eq!(text, "HW1 due 2025-09-28"),
            other => panic!("expected text, got {:?}", other),
        }
    }

    #[test]
    fn test_batch_report_tallies() {
        let mut report = BatchReport::new();
        report.push(DocumentResult::rejected("a.docx", "Invalid file type"));
        report.push(DocumentResult {
            filename: "b.pdf".to_string(),
            success: true,
            record: Some(DeadlineRecord::new("b.pdf")),
            error: None,
        });

        assert_eq!(report.total_files, 2);
        assert_eq!(report.processed, 1);
        assert_eq!(report.failed, 1);
    }

    #[test]
    fn test_document_result_serialization() {
        let result = DocumentResult::rejected("a.docx", "Invalid file type");
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["error"], "Invalid file type");
        assert!(value.get("deadlines").is_none());
    }
}
