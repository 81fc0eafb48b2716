//! Tagged result of running one document through extraction

use crate::record::DeadlineRecord;

/// What extraction produced for one document
///
/// Failures are data, not errors: a batch can branch-free collect outcomes and
/// count them, and a failed outcome still yields a well-formed record.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionOutcome {
    /// The service returned a usable record
    Extracted(DeadlineRecord),

    /// The service call or response handling failed
    Failed {
        /// Document the failure belongs to
        source_file: String,
        /// Human-readable failure description
        reason: String,
    },
}

impl ExtractionOutcome {
    /// Create a failed outcome
    pub fn failed(source_file: impl Into<String>, reason: impl Into<String>) -> Self {
        ExtractionOutcome::Failed {
            source_file: source_file.into(),
            reason: reason.into(),
        }
    }

    /// Whether extraction succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, ExtractionOutcome::Extracted(_))
    }

    /// The document this outcome belongs to
    pub fn source_file(&self) -> &str {
        match self {
            ExtractionOutcome::Extracted(record) => &record.source_file,
            ExtractionOutcome::Failed { source_file, .. } => source_file,
        }
    }

    /// The failure reason, if any
    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            ExtractionOutcome::Extracted(_) => None,
            ExtractionOutcome::Failed { reason, .. } => Some(reason),
        }
    }

    /// The record to persist: the extracted one, or an error-marked empty one
    pub fn into_record(self) -> DeadlineRecord {
        match self {
            ExtractionOutcome::Extracted(record) => record,
            ExtractionOutcome::Failed { source_file, reason } => {
                DeadlineRecord::failed(source_file, reason)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_outcome_into_record() {
        let outcome = ExtractionOutcome::failed("bad.pdf", "malformed response");
        assert!(!outcome.is_success());
        assert_eq!(outcome.source_file(), "bad.pdf");
        assert_eq!(outcome.failure_reason(), Some("malformed response"));

        let record = outcome.into_record();
        assert_eq!(record.source_file, "bad.pdf");
        assert_eq!(record.extraction_error.as_deref(), Some("malformed response"));
        assert!(record.assignments.is_empty());
        assert!(record.exams.is_empty());
    }

    #[test]
    fn test_extracted_outcome_keeps_record() {
        let record = DeadlineRecord::new("cs101.pdf");
        let outcome = ExtractionOutcome::Extracted(record.clone());
        assert!(outcome.is_success());
        assert_eq!(outcome.failure_reason(), None);
        assert_eq!(outcome.into_record(), record);
    }
}
