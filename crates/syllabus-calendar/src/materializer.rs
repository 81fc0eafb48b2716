//! Collection to calendar events

use crate::config::CalendarConfig;
use crate::event::{event_uid, CalendarEvent, EventKind};
use crate::ics;
use serde::Serialize;
use syllabus_domain::{DateNormalizer, DeadlineCollection, DeadlineRecord};
use tracing::{debug, warn};

/// An item that produced no event because its date could not be read
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedItem {
    /// Record the item belongs to
    pub source_file: String,

    /// Course code shown in the title
    pub course_code: String,

    /// Item name
    pub name: String,

    /// Assignment or exam
    pub kind: EventKind,

    /// Date text as extracted
    pub raw_date: String,
}

/// Result of materializing a collection
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Materialization {
    /// Events in record order, assignments before exams within a record
    pub events: Vec<CalendarEvent>,

    /// Items left out for lack of a usable date
    pub skipped: Vec<SkippedItem>,
}

impl Materialization {
    /// Number of events emitted
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Number of items skipped
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Render as a complete `.ics` document
    pub fn to_ics(&self, calendar_name: &str) -> String {
        ics::render(&self.events, calendar_name)
    }
}

/// Turns a deadline collection into calendar events
#[derive(Debug, Clone, Default)]
pub struct Materializer {
    config: CalendarConfig,
    normalizer: DateNormalizer,
}

impl Materializer {
    /// Create a materializer with the given configuration
    pub fn new(config: CalendarConfig) -> Self {
        let normalizer = DateNormalizer::with_order(config.date_order);
        debug!("Materializer resolving slash dates as {:?}", normalizer.order());
        Self { config, normalizer }
    }

    /// Active configuration
    pub fn config(&self) -> &CalendarConfig {
        &self.config
    }

    /// Derive events from every record in the collection
    ///
    /// Unparseable dates are skipped and counted, never an error. Records
    /// that carry an extraction error are walked like any other; normally
    /// they have no items.
    pub fn materialize(&self, collection: &DeadlineCollection) -> Materialization {
        let mut out = Materialization::default();

        for record in collection {
            self.add_record(record, &mut out);
        }

        debug!(
            "Materialized {} events, skipped {}",
            out.event_count(),
            out.skipped_count()
        );
        out
    }

    /// Materialize and render in one step using the configured calendar name
    pub fn render(&self, collection: &DeadlineCollection) -> (Materialization, String) {
        let materialization = self.materialize(collection);
        let ics = materialization.to_ics(&self.config.calendar_name);
        (materialization, ics)
    }

    fn add_record(&self, record: &DeadlineRecord, out: &mut Materialization) {
        let course_code = record.course_code_or_default();
        let course_name = record.course_name_or_default();

        for (position, assignment) in record.assignments.iter().enumerate() {
            self.add_item(
                out,
                ItemRef {
                    record,
                    course_code,
                    course_name,
                    kind: EventKind::Assignment,
                    position,
                    name: &assignment.name,
                    raw_date: &assignment.due_date,
                    detail: assignment.description_or_name(),
                },
            );
        }

        for (position, exam) in record.exams.iter().enumerate() {
            self.add_item(
                out,
                ItemRef {
                    record,
                    course_code,
                    course_name,
                    kind: EventKind::Exam,
                    position,
                    name: &exam.name,
                    raw_date: &exam.date,
                    detail: exam.description_or_name(),
                },
            );
        }
    }

    fn add_item(&self, out: &mut Materialization, item: ItemRef<'_>) {
        let Some(start) = self.normalizer.normalize(item.raw_date).instant() else {
            warn!(
                "Skipped {} (no valid date): [{}] {} ({:?})",
                item.kind.label().to_lowercase(),
                item.course_code,
                item.name,
                item.raw_date
            );
            out.skipped.push(SkippedItem {
                source_file: item.record.source_file.clone(),
                course_code: item.course_code.to_string(),
                name: item.name.to_string(),
                kind: item.kind,
                raw_date: item.raw_date.to_string(),
            });
            return;
        };

        let duration_hours = match item.kind {
            EventKind::Assignment => 0,
            EventKind::Exam => self.config.exam_duration_hours,
        };

        out.events.push(CalendarEvent {
            title: format!("[{}] {}", item.course_code, item.name),
            start,
            duration_hours,
            description: format!(
                "{}\n\n{}: {}",
                item.course_name,
                item.kind.label(),
                item.detail
            ),
            kind: item.kind,
            uid: event_uid(&item.record.source_file, item.kind, item.position, item.name),
        });
    }
}

struct ItemRef<'a> {
    record: &'a DeadlineRecord,
    course_code: &'a str,
    course_name: &'a str,
    kind: EventKind,
    position: usize,
    name: &'a str,
    raw_date: &'a str,
    detail: &'a str,
}
