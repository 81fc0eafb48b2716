//! iCalendar rendering

use crate::event::CalendarEvent;
use icalendar::{Calendar, CalendarDateTime, Component, Event, EventLike};

/// Render events as a complete `.ics` document
///
/// All-day events span one `DATE` (ending the following day); timed events get
/// floating start and end times, since syllabi never state a time zone.
pub(crate) fn render(events: &[CalendarEvent], calendar_name: &str) -> String {
    let mut calendar = Calendar::new();
    calendar.name(calendar_name);

    for event in events {
        let mut vevent = Event::new();
        vevent.uid(&event.uid);
        vevent.summary(&event.title);
        if !event.description.is_empty() {
            vevent.description(&event.description);
        }

        match event.end() {
            None => {
                // DTEND is exclusive for DATE values
                let day = event.start.date();
                vevent.starts(day);
                if let Some(next) = day.succ_opt() {
                    vevent.ends(next);
                }
            }
            Some(end) => {
                vevent.starts(CalendarDateTime::Floating(event.start));
                vevent.ends(CalendarDateTime::Floating(end));
            }
        }

        calendar.push(vevent.done());
    }

    calendar.done().to_string()
}
