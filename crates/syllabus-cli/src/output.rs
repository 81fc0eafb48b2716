//! Output formatting for the CLI.

use crate::cli::CliFormat;
use crate::error::Result;
use colored::*;
use syllabus_calendar::Materialization;
use syllabus_domain::DeadlineCollection;
use syllabus_extractor::BatchReport;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(color_enabled: bool) -> Self {
        Self { color_enabled }
    }

    /// Format the stored deadlines, one row per assignment or exam.
    pub fn format_deadlines(&self, collection: &DeadlineCollection, format: CliFormat) -> Result<String> {
        match format {
            CliFormat::Json => Ok(serde_json::to_string_pretty(collection)?),
            CliFormat::Table => Ok(self.format_deadlines_table(collection)),
        }
    }

    fn format_deadlines_table(&self, collection: &DeadlineCollection) -> String {
        if collection.is_empty() {
            return self.colorize("No deadlines found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Course", "Kind", "Name", "Date", "Source"]);

        for record in collection {
            let course = record.course_code_or_default();

            if let Some(error) = &record.extraction_error {
                builder.push_record([course, "error", error.as_str(), "", &record.source_file]);
                continue;
            }

            for assignment in &record.assignments {
                builder.push_record([
                    course,
                    "assignment",
                    &assignment.name,
                    &assignment.due_date,
                    &record.source_file,
                ]);
            }
            for exam in &record.exams {
                builder.push_record([course, "exam", &exam.name, &exam.date, &record.source_file]);
            }
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format a processing report.
    pub fn format_report(&self, report: &BatchReport, format: CliFormat) -> Result<String> {
        if format == CliFormat::Json {
            return Ok(serde_json::to_string_pretty(report)?);
        }

        let mut lines = Vec::with_capacity(report.results.len() + 1);
        for result in &report.results {
            match (&result.error, &result.record) {
                (None, Some(record)) => lines.push(self.success(&format!(
                    "{}: {} assignment(s), {} exam(s)",
                    result.filename,
                    record.assignments.len(),
                    record.exams.len()
                ))),
                (Some(error), _) => lines.push(self.error(&format!("{}: {}", result.filename, error))),
                (None, None) => lines.push(self.error(&result.filename)),
            }
        }

        let summary = format!(
            "Processed {} of {} file(s), {} failed",
            report.processed, report.total_files, report.failed
        );
        lines.push(if report.failed > 0 {
            self.warning(&summary)
        } else {
            self.info(&summary)
        });

        Ok(lines.join("\n"))
    }

    /// Summarize a calendar export.
    pub fn calendar_written(&self, materialization: &Materialization, path: &str) -> String {
        let mut out = self.success(&format!(
            "{} created with {} event(s)",
            path,
            materialization.event_count()
        ));
        if materialization.skipped_count() > 0 {
            out.push('\n');
            out.push_str(&self.warning(&format!(
                "Skipped {} item(s) with missing or invalid dates",
                materialization.skipped_count()
            )));
        }
        out
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
