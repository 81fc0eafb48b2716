//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{DeadlineCollection, DeadlineRecord, UpsertOutcome};

/// Trait for persisting deadline records
///
/// Implemented by the infrastructure layer (syllabus-store). Implementations
/// only provide whole-collection reads and writes plus the per-document
/// artifact; the merge policy lives in [`DeadlineStore::upsert`].
///
/// A store is not safe under concurrent writers on its own. Callers that share
/// one across tasks serialize access through a single lock.
pub trait DeadlineStore {
    /// Error type for store operations
    type Error;

    /// Load the combined collection, or `None` if it was never written
    fn load_existing(&self) -> Result<Option<DeadlineCollection>, Self::Error>;

    /// Replace the combined collection
    fn save_all(&mut self, collection: &DeadlineCollection) -> Result<(), Self::Error>;

    /// Write the per-document artifact for one record
    fn save_record(&mut self, record: &DeadlineRecord) -> Result<(), Self::Error>;

    /// Load the combined collection, empty if it was never written
    fn load_all(&self) -> Result<DeadlineCollection, Self::Error> {
        Ok(self.load_existing()?.unwrap_or_default())
    }

    /// Read-merge-write: replace the record with the same `source_file`
    ///
    /// Writes the refreshed combined collection, then the per-document
    /// artifact. The collection is the source of truth for materialization,
    /// so it is written first: if it fails, neither artifact changes. If only
    /// the per-document write fails, the error is returned and reprocessing
    /// the document brings the two back in line.
    fn upsert(&mut self, record: DeadlineRecord) -> Result<UpsertOutcome, Self::Error> {
        let mut collection = self.load_all()?;
        let outcome = collection.upsert(record.clone());
        self.save_all(&collection)?;
        self.save_record(&record)?;
        Ok(outcome)
    }
}
