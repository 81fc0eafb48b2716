//! Syllabus Calendar
//!
//! Derives calendar events from a deadline collection and renders them as an
//! iCalendar document.
//!
//! Assignments become all-day events, exams become timed events (two hours by
//! default). Items whose date cannot be read are skipped and reported, never
//! treated as errors. Event order follows record order, assignments before
//! exams; nothing is sorted by date.
//!
//! # Example
//!
//! ```
//! use syllabus_calendar::{CalendarConfig, Materializer};
//! use syllabus_domain::{AssignmentItem, DeadlineCollection, DeadlineRecord};
//!
//! let mut record = DeadlineRecord::new("cs101.pdf");
//! record.course_code = Some("CS101".to_string());
//! record.assignments.push(AssignmentItem::new("HW1", "2025-09-28"));
//! record.assignments.push(AssignmentItem::new("HW2", "Week 5"));
//!
//! let collection: DeadlineCollection = vec![record].into_iter().collect();
//! let result = Materializer::new(CalendarConfig::default()).materialize(&collection);
//!
//! assert_eq!(result.event_count(), 1);
//! assert_eq!(result.skipped_count(), 1);
//! assert!(result.to_ics("Fall 2025").contains("[CS101] HW1"));
//! ```

#![warn(missing_docs)]

mod config;
mod event;
mod ics;
mod materializer;

pub use config::{CalendarConfig, DEFAULT_CALENDAR_NAME};
pub use event::{CalendarEvent, EventKind};
pub use materializer::{Materialization, Materializer, SkippedItem};

/// Materialize with the default configuration
pub fn materialize(collection: &syllabus_domain::DeadlineCollection) -> Materialization {
    Materializer::default().materialize(collection)
}
