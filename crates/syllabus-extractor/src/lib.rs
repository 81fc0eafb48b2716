//! Syllabus Extractor
//!
//! Turns syllabus documents into committed deadline records.
//!
//! # Architecture
//!
//! ```text
//! Document → text → LLM → DeadlineRecord → DeadlineStore (upsert)
//! ```
//!
//! Every document that reaches the orchestrator leaves a record behind. When
//! extraction fails (unreadable PDF, timeout, malformed response) the record
//! carries an error message and no deadlines, and it still replaces whatever
//! was stored for that file before.
//!
//! # Example Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use syllabus_extractor::{Document, Extractor, ExtractorConfig};
//! use syllabus_llm::MockProvider;
//! use syllabus_store::MemoryStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = Arc::new(MockProvider::new(r#"{"course_code": "CS101", "assignments": []}"#));
//! let extractor = Extractor::new(llm, MemoryStore::new(), ExtractorConfig::default());
//!
//! let processed = extractor
//!     .process(Document::text("cs101.txt", "HW1 due 2025-09-28"))
//!     .await?;
//!
//! println!("{}: {} deadlines", processed.output_file, processed.record.deadline_count());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
pub mod document;
mod error;
mod extractor;
mod parser;
mod prompt;
mod types;


pub use config::ExtractorConfig;
pub use document::extract_pdf_text;
pub use error::ExtractorError;
pub use extractor::Extractor;
pub use types::{BatchReport, Document, DocumentContent, DocumentResult, ProcessedDocument};
