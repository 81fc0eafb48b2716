//! LLM prompt construction for deadline extraction

use syllabus_llm::CompletionRequest;

/// Builds completion requests that ask for a syllabus's deadlines
pub struct PromptBuilder {
    text: String,
    filename: String,
    temperature: f32,
}

impl PromptBuilder {
    /// Create a new prompt builder for one document
    pub fn new(text: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            filename: filename.into(),
            temperature: 0.1,
        }
    }

    /// Override the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Build the completion request
    pub fn build(&self) -> CompletionRequest {
        let mut user = String::with_capacity(self.text.len() + 128);
        user.push_str(&format!("Source file: {}\n\n", self.filename));
        user.push_str("Extract deadlines from this syllabus:\n");
        user.push_str("---\n");
        user.push_str(&self.text);
        user.push_str("\n---\n");

        CompletionRequest::new(EXTRACTION_INSTRUCTIONS, user).with_temperature(self.temperature)
    }
}

const EXTRACTION_INSTRUCTIONS: &str = r#"You read course syllabi and list every assignment deadline and exam date they contain.

Respond with a single JSON object in exactly this shape:
{
  "course_name": "full course title, or null",
  "course_code": "short course code such as CS101, or null",
  "term": "term or semester, or null",
  "assignments": [
    {"name": "assignment title", "due_date": "YYYY-MM-DD, or the date exactly as written", "description": "short detail, or null"}
  ],
  "exams": [
    {"name": "exam title such as Midterm or Final", "date": "YYYY-MM-DD, or the date exactly as written", "description": "time, place or coverage, or null"}
  ]
}

Rules:
- Read the whole text before answering
- Prefer YYYY-MM-DD when the year can be determined; add " HH:MM:SS" only when a time is stated
- Keep relative dates ("Week 3", "TBA") as written instead of guessing
- Use "Not specified" when an item has no date at all
- Return only the JSON object, no markdown and no commentary"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_includes_text_and_filename() {
        let request = PromptBuilder::new("HW1 due Sept 28", "cs101.pdf").build();
        assert!(request.user.contains("HW1 due Sept 28"));
        assert!(request.user.contains("Source file: cs101.pdf"));
    }

    #[test]
    fn test_prompt_describes_output_shape() {
        let request = PromptBuilder::new("text", "x.pdf").build();
        assert!(request.system.contains("\"assignments\""));
        assert!(request.system.contains("\"due_date\""));
        assert!(request.system.contains("\"exams\""));
        assert!(request.json_mode);
    }

    #[test]
    fn test_prompt_temperature() {
        let request = PromptBuilder::new("text", "x.pdf").with_temperature(0.4).build();
        assert_eq!(request.temperature, 0.4);
    }
}
