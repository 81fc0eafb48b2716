//! The combined collection of deadline records

use crate::record::DeadlineRecord;
use serde::{Deserialize, Serialize};

/// What an upsert did to the collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No record for this source file existed
    Inserted,
    /// A record for this source file was replaced
    Replaced,
}

/// Ordered sequence of records, at most one per `source_file`
///
/// Serializes as a bare JSON array.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeadlineCollection {
    records: Vec<DeadlineRecord>,
}

impl DeadlineCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the record for `record.source_file`
    ///
    /// Any existing entry for the same source file is removed and the incoming
    /// record is appended, so a replaced record moves to the end.
    ///
    /// # Examples
    ///
    /// ```
    /// use syllabus_domain::{DeadlineCollection, DeadlineRecord, UpsertOutcome};
    ///
    /// let mut collection = DeadlineCollection::new();
    /// assert_eq!(collection.upsert(DeadlineRecord::new("a.pdf")), UpsertOutcome::Inserted);
    /// assert_eq!(collection.upsert(DeadlineRecord::new("a.pdf")), UpsertOutcome::Replaced);
    /// assert_eq!(collection.len(), 1);
    /// ```
    pub fn upsert(&mut self, record: DeadlineRecord) -> UpsertOutcome {
        let before = self.records.len();
        self.records.retain(|r| r.source_file != record.source_file);
        let outcome = if self.records.len() == before {
            UpsertOutcome::Inserted
        } else {
            UpsertOutcome::Replaced
        };
        self.records.push(record);
        outcome
    }

    /// Look up the record for a source file
    pub fn get(&self, source_file: &str) -> Option<&DeadlineRecord> {
        self.records.iter().find(|r| r.source_file == source_file)
    }

    /// All records in order
    pub fn records(&self) -> &[DeadlineRecord] {
        &self.records
    }

    /// Iterate over records in order
    pub fn iter(&self) -> std::slice::Iter<'_, DeadlineRecord> {
        self.records.iter()
    }

    /// Source file names in order
    pub fn source_files(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.source_file.as_str()).collect()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the collection holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<DeadlineRecord> for DeadlineCollection {
    /// Builds through [`DeadlineCollection::upsert`], so later duplicates win
    fn from_iter<I: IntoIterator<Item = DeadlineRecord>>(iter: I) -> Self {
        let mut collection = Self::new();
        for record in iter {
            collection.upsert(record);
        }
        collection
    }
}

impl IntoIterator for DeadlineCollection {
    type Item = DeadlineRecord;
    type IntoIter = std::vec::IntoIter<DeadlineRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a DeadlineCollection {
    type Item = &'a DeadlineRecord;
    type IntoIter = std::slice::Iter<'a, DeadlineRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::AssignmentItem;

    fn record_with(source: &str, assignment: &str) -> DeadlineRecord {
        let mut record = DeadlineRecord::new(source);
        record.assignments.push(AssignmentItem::new(assignment, "2025-09-28"));
        record
    }

    #[test]
    fn test_upsert_identical_record_is_idempotent() {
        let mut collection = DeadlineCollection::new();
        let record = record_with("cs101.pdf", "HW1");

        collection.upsert(record.clone());
        let snapshot = collection.clone();
        collection.upsert(record);

        assert_eq!(collection, snapshot);
        assert_eq!(collection.source_files(), vec!["cs101.pdf"]);
    }

    #[test]
    fn test_upsert_replaces_same_source() {
        let mut collection = DeadlineCollection::new();
        collection.upsert(record_with("cs101.pdf", "HW1"));
        let outcome = collection.upsert(record_with("cs101.pdf", "HW9"));

        assert_eq!(outcome, UpsertOutcome::Replaced);
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.get("cs101.pdf").unwrap().assignments[0].name, "HW9");
    }

    #[test]
    fn test_replaced_record_moves_to_end() {
        let mut collection = DeadlineCollection::new();
        collection.upsert(record_with("a.pdf", "A"));
        collection.upsert(record_with("b.pdf", "B"));
        collection.upsert(record_with("a.pdf", "A2"));

        assert_eq!(collection.source_files(), vec!["b.pdf", "a.pdf"]);
    }

    #[test]
    fn test_serializes_as_array() {
        let collection: DeadlineCollection = vec![record_with("a.pdf", "A")].into_iter().collect();
        let value = serde_json::to_value(&collection).unwrap();
        assert!(value.is_array());
        assert_eq!(value[0]["source_file"], "a.pdf");

        let parsed: DeadlineCollection = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, collection);
    }

    #[test]
    fn test_from_iter_deduplicates() {
        let collection: DeadlineCollection = vec![
            record_with("a.pdf", "first"),
            record_with("a.pdf", "second"),
        ]
        .into_iter()
        .collect();

        assert_eq!(collection.len(), 1);
        assert_eq!(collection.get("a.pdf").unwrap().assignments[0].name, "second");
    }
}
