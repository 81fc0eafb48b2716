//! Syllabus Domain Layer
//!
//! This crate contains the core data model for the syllabus scheduler and the
//! trait interfaces that the infrastructure crates implement. It depends only
//! on `serde` (records are persisted as JSON) and `chrono` (date arithmetic).
//!
//! ## Key Concepts
//!
//! - **DeadlineRecord**: The extraction result for one source document
//! - **DeadlineCollection**: All records, unique on `source_file`
//! - **NormalizedDate**: A raw date string resolved to an instant, or `Unparseable`
//! - **ExtractionOutcome**: Tagged result of running one document through extraction
//!
//! ## Architecture
//!
//! - Pure business logic only
//! - Infrastructure implementations (file store, LLM client, HTTP) live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod collection;
pub mod date;
pub mod outcome;
pub mod record;
pub mod traits;

// Re-exports for convenience
pub use collection::{DeadlineCollection, UpsertOutcome};
pub use date::{normalize, DateNormalizer, DateOrder, NormalizedDate};
pub use outcome::ExtractionOutcome;
pub use record::{AssignmentItem, DeadlineRecord, ExamItem};
