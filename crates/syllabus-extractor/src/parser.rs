//! Parse LLM output into a deadline record

use crate::error::ExtractionFailure;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use syllabus_domain::{AssignmentItem, DeadlineRecord, ExamItem};
use tracing::warn;

/// Parse an LLM JSON response into a record for `source_file`
///
/// The top level must be a JSON object. Individual assignments or exams that
/// are malformed (e.g. no name) are skipped with a warning rather than failing
/// the whole document.
pub(crate) fn parse_llm_response(
    response: &str,
    source_file: &str,
) -> Result<DeadlineRecord, ExtractionFailure> {
    // LLMs sometimes wrap JSON in markdown code blocks
    let json_str = extract_json(response)?;

    let json: Value = serde_json::from_str(&json_str)?;

    let obj = json
        .as_object()
        .ok_or_else(|| ExtractionFailure::InvalidFormat("Expected JSON object".to_string()))?;

    Ok(DeadlineRecord {
        source_file: source_file.to_string(),
        course_name: text_field(obj, "course_name"),
        course_code: text_field(obj, "course_code"),
        term: text_field(obj, "term"),
        assignments: items::<AssignmentItem>(obj, "assignments", source_file),
        exams: items::<ExamItem>(obj, "exams", source_file),
        extraction_error: None,
    })
}

/// Extract JSON from response, handling markdown code blocks
fn extract_json(response: &str) -> Result<String, ExtractionFailure> {
    let trimmed = response.trim();

    if trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() < 2 {
            return Err(ExtractionFailure::InvalidFormat("Empty code block".to_string()));
        }

        // Skip first line (```json or ```) and a closing fence if present
        let end = if lines[lines.len() - 1].trim_start().starts_with("```") {
            lines.len() - 1
        } else {
            lines.len()
        };
        Ok(lines[1..end].join("\n"))
    } else {
        Ok(trimmed.to_string())
    }
}

/// A non-blank string field; anything else (null, number, "") is absent
fn text_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn items<T: DeserializeOwned>(obj: &Map<String, Value>, key: &str, source_file: &str) -> Vec<T> {
    let Some(value) = obj.get(key) else {
        return Vec::new();
    };

    let Some(array) = value.as_array() else {
        if !value.is_null() {
            warn!("{}: '{}' is not an array, ignoring it", source_file, key);
        }
        return Vec::new();
    };

    array
        .iter()
        .enumerate()
        .filter_map(|(idx, item)| match serde_json::from_value::<T>(item.clone()) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!("{}: skipping {} entry {}: {}", source_file, key, idx, e);
                None
            }
        })
        .collect()
}
