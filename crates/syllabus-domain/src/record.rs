//! Deadline records - the extracted shape of one syllabus

use serde::{Deserialize, Deserializer, Serialize};

/// Course code shown when extraction found none
pub const UNKNOWN_COURSE_CODE: &str = "Unknown";

/// Course name shown when extraction found none
pub const UNKNOWN_COURSE_NAME: &str = "Unknown Course";

/// The structured extraction result for one source document
///
/// `source_file` is the identity used for merging: reprocessing a document
/// with the same name replaces its record wholesale.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DeadlineRecord {
    /// Name of the document this record was extracted from
    #[serde(default)]
    pub source_file: String,

    /// Human-readable course title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_name: Option<String>,

    /// Short course identifier (e.g. "CS101")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_code: Option<String>,

    /// Term or semester
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,

    /// Assignment deadlines in document order
    #[serde(default)]
    pub assignments: Vec<AssignmentItem>,

    /// Exam dates in document order
    #[serde(default)]
    pub exams: Vec<ExamItem>,

    /// Why extraction failed, if it did
    #[serde(rename = "error", default, skip_serializing_if = "Option::is_none")]
    pub extraction_error: Option<String>,
}

/// One assignment deadline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentItem {
    /// Assignment title
    pub name: String,

    /// Raw due date as written in the syllabus
    #[serde(default, deserialize_with = "null_as_empty")]
    pub due_date: String,

    /// Optional details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One exam date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamItem {
    /// Exam title (e.g. "Midterm")
    pub name: String,

    /// Raw exam date as written in the syllabus
    #[serde(default, deserialize_with = "null_as_empty")]
    pub date: String,

    /// Optional details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Treat blank strings the same as a missing value
fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

impl DeadlineRecord {
    /// Create an empty record for a source document
    pub fn new(source_file: impl Into<String>) -> Self {
        Self {
            source_file: source_file.into(),
            ..Self::default()
        }
    }

    /// Create an error-marked record with no deadlines
    pub fn failed(source_file: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            source_file: source_file.into(),
            extraction_error: Some(reason.into()),
            ..Self::default()
        }
    }

    /// Whether extraction failed for this document
    pub fn is_error(&self) -> bool {
        self.extraction_error.is_some()
    }

    /// Course code, or [`UNKNOWN_COURSE_CODE`]
    pub fn course_code_or_default(&self) -> &str {
        non_blank(&self.course_code).unwrap_or(UNKNOWN_COURSE_CODE)
    }

    /// Course name, or [`UNKNOWN_COURSE_NAME`]
    pub fn course_name_or_default(&self) -> &str {
        non_blank(&self.course_name).unwrap_or(UNKNOWN_COURSE_NAME)
    }

    /// Number of assignments plus exams
    pub fn deadline_count(&self) -> usize {
        self.assignments.len() + self.exams.len()
    }
}

impl AssignmentItem {
    /// Create an assignment without a description
    pub fn new(name: impl Into<String>, due_date: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            due_date: due_date.into(),
            description: None,
        }
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Description, falling back to the assignment name
    pub fn description_or_name(&self) -> &str {
        non_blank(&self.description).unwrap_or(self.name.as_str())
    }
}

impl ExamItem {
    /// Create an exam without a description
    pub fn new(name: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            date: date.into(),
            description: None,
        }
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Description, falling back to the exam name
    pub fn description_or_name(&self) -> &str {
        non_blank(&self.description).unwrap_or(self.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_record() {
        let record: DeadlineRecord = serde_json::from_str(r#"{"source_file": "cs101.pdf"}"#).unwrap();
        assert_eq!(record.source_file, "cs101.pdf");
        assert!(record.assignments.is_empty());
        assert!(record.exams.is_empty());
        assert!(!record.is_error());
    }

    #[test]
    fn test_error_key_maps_to_extraction_error() {
        let json = r#"{"source_file": "bad.pdf", "error": "boom", "assignments": [], "exams": []}"#;
        let record: DeadlineRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.extraction_error.as_deref(), Some("boom"));

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["error"], "boom");
        assert!(value.get("extraction_error").is_none());
    }

    #[test]
    fn test_null_dates_become_empty() {
        let json = r#"{"name": "HW1", "due_date": null}"#;
        let item: AssignmentItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.due_date, "");

        let item: ExamItem = serde_json::from_str(r#"{"name": "Final"}"#).unwrap();
        assert_eq!(item.date, "");
    }

    #[test]
    fn test_item_requires_name() {
        let result: Result<AssignmentItem, _> = serde_json::from_str(r#"{"due_date": "2025-09-28"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_display_defaults() {
        let mut record = DeadlineRecord::new("x.pdf");
        assert_eq!(record.course_code_or_default(), UNKNOWN_COURSE_CODE);
        assert_eq!(record.course_name_or_default(), UNKNOWN_COURSE_NAME);

        record.course_code = Some("  ".to_string());
        assert_eq!(record.course_code_or_default(), UNKNOWN_COURSE_CODE);

        record.course_code = Some("CS101".to_string());
        assert_eq!(record.course_code_or_default(), "CS101");
    }

    #[test]
    fn test_description_falls_back_to_name() {
        let item = AssignmentItem::new("HW1", "2025-09-28");
        assert_eq!(item.description_or_name(), "HW1");

        let item = item.with_description("Problems 1-5");
        assert_eq!(item.description_or_name(), "Problems 1-5");

        let exam = ExamItem::new("Midterm", "10/15/2025").with_description("");
        assert_eq!(exam.description_or_name(), "Midterm");
    }

    #[test]
    fn test_failed_record_is_empty() {
        let record = DeadlineRecord::failed("bad.pdf", "timeout");
        assert!(record.is_error());
        assert_eq!(record.deadline_count(), 0);
        assert_eq!(record.source_file, "bad.pdf");
    }

    #[test]
    fn test_absent_optionals_are_omitted() {
        let record = DeadlineRecord::new("x.pdf");
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("course_name").is_none());
        assert!(value.get("error").is_none());
        assert_eq!(value["assignments"], serde_json::json!([]));
    }
}
