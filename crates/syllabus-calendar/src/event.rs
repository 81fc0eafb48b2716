//! Calendar event types

use chrono::{Duration, NaiveDateTime};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// Namespace for deterministic event UIDs
const UID_NAMESPACE: Uuid = Uuid::from_bytes([
    0x5b, 0x1f, 0x3c, 0x7e, 0x2a, 0x94, 0x4d, 0x0b, 0x9e, 0x61, 0xc8, 0x33, 0x70, 0xd2, 0x4f, 0x16,
]);

/// What an event was derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// An assignment due date
    Assignment,
    /// An exam date
    Exam,
}

impl EventKind {
    /// Label used in event descriptions
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Assignment => "Assignment",
            EventKind::Exam => "Exam",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One calendar entry derived from a deadline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarEvent {
    /// `[{course_code}] {item name}`
    pub title: String,

    /// Start instant (floating, no time zone)
    pub start: NaiveDateTime,

    /// Length in hours; 0 marks an all-day event
    pub duration_hours: u32,

    /// Course name followed by the item's description
    pub description: String,

    /// Assignment or exam
    pub kind: EventKind,

    /// Stable identifier, the same for the same item on every run
    pub uid: String,
}

impl CalendarEvent {
    /// Whether this is an all-day event
    pub fn is_all_day(&self) -> bool {
        self.duration_hours == 0
    }

    /// End instant for timed events
    pub fn end(&self) -> Option<NaiveDateTime> {
        if self.is_all_day() {
            None
        } else {
            Some(self.start + Duration::hours(i64::from(self.duration_hours)))
        }
    }
}

/// Deterministic UID for an item
///
/// Built from the source file, kind, position within the record and name, so
/// regenerating the calendar keeps UIDs stable and two same-named items in one
/// record stay distinct.
pub(crate) fn event_uid(source_file: &str, kind: EventKind, position: usize, name: &str) -> String {
    let key = format!("{}\u{1f}{}\u{1f}{}\u{1f}{}", source_file, kind.label(), position, name);
    format!("{}@syllabus-scheduler", Uuid::new_v5(&UID_NAMESPACE, key.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_event_end() {
        let event = CalendarEvent {
            title: "[CS101] Midterm".to_string(),
            start: at(2025, 10, 15, 9),
            duration_hours: 2,
            description: String::new(),
            kind: EventKind::Exam,
            uid: String::new(),
        };
        assert!(!event.is_all_day());
        assert_eq!(event.end(), Some(at(2025, 10, 15, 11)));
    }

    #[test]
    fn test_all_day_has_no_end() {
        let event = CalendarEvent {
            title: "[CS101] HW1".to_string(),
            start: at(2025, 9, 28, 0),
            duration_hours: 0,
            description: String::new(),
            kind: EventKind::Assignment,
            uid: String::new(),
        };
        assert!(event.is_all_day());
        assert_eq!(event.end(), None);
    }

    #[test]
    fn test_uid_is_deterministic() {
        let a = event_uid("cs101.pdf", EventKind::Assignment, 0, "HW1");
        let b = event_uid("cs101.pdf", EventKind::Assignment, 0, "HW1");
        assert_eq!(a, b);
        assert!(a.ends_with("@syllabus-scheduler"));
    }

    #[test]
    fn test_uid_distinguishes_items() {
        let base = event_uid("cs101.pdf", EventKind::Assignment, 0, "HW1");
        assert_ne!(base, event_uid("cs102.pdf", EventKind::Assignment, 0, "HW1"));
        assert_ne!(base, event_uid("cs101.pdf", EventKind::Exam, 0, "HW1"));
        assert_ne!(base, event_uid("cs101.pdf", EventKind::Assignment, 1, "HW1"));
    }
}
