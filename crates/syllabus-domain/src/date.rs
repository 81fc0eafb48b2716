//! Date normalization for raw deadline strings
//!
//! Extraction returns dates exactly as they appear in a syllabus ("2025-09-28",
//! "09/28/2025", "Week 3", ...). The normalizer resolves the handful of
//! supported notations to a [`NaiveDateTime`] and reports everything else as
//! [`NormalizedDate::Unparseable`]. It never fails and never panics.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Literal that extraction uses when a syllabus names no date
const NOT_SPECIFIED: &str = "not specified";

const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const ISO_DATE_FORMAT: &str = "%Y-%m-%d";
const MONTH_FIRST_FORMAT: &str = "%m/%d/%Y";
const DAY_FIRST_FORMAT: &str = "%d/%m/%Y";

/// Result of normalizing a raw date string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NormalizedDate {
    /// The string matched one of the supported formats
    At(NaiveDateTime),

    /// Empty, "not specified", or no supported format matched
    Unparseable,
}

impl NormalizedDate {
    /// The parsed instant, if any
    pub fn instant(&self) -> Option<NaiveDateTime> {
        match self {
            NormalizedDate::At(instant) => Some(*instant),
            NormalizedDate::Unparseable => None,
        }
    }

    /// The calendar date of the parsed instant, if any
    pub fn date(&self) -> Option<NaiveDate> {
        self.instant().map(|instant| instant.date())
    }

    /// Whether the string could not be resolved
    pub fn is_unparseable(&self) -> bool {
        matches!(self, NormalizedDate::Unparseable)
    }
}

/// Which slash-separated notation wins when both would parse
///
/// `03/04/2025` is valid as both March 4 and April 3. The first format tried
/// wins, so this setting decides how locale-ambiguous dates are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateOrder {
    /// `MM/DD/YYYY` is tried before `DD/MM/YYYY`
    #[default]
    MonthFirst,
    /// `DD/MM/YYYY` is tried before `MM/DD/YYYY`
    DayFirst,
}

/// Resolves raw date strings using a fixed, ordered set of formats
#[derive(Debug, Clone, Copy, Default)]
pub struct DateNormalizer {
    order: DateOrder,
}

impl DateNormalizer {
    /// Create a normalizer with the default month-first priority
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a normalizer with an explicit slash-format priority
    pub fn with_order(order: DateOrder) -> Self {
        Self { order }
    }

    /// The slash-format priority in use
    pub fn order(&self) -> DateOrder {
        self.order
    }

    /// Normalize a raw date string
    ///
    /// # Examples
    ///
    /// ```
    /// use syllabus_domain::{DateNormalizer, NormalizedDate};
    ///
    /// let normalizer = DateNormalizer::new();
    /// assert!(normalizer.normalize("Week 3").is_unparseable());
    /// assert_eq!(
    ///     normalizer.normalize("2025-09-28").date(),
    ///     normalizer.normalize("09/28/2025").date(),
    /// );
    /// ```
    pub fn normalize(&self, raw: &str) -> NormalizedDate {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case(NOT_SPECIFIED) {
            return NormalizedDate::Unparseable;
        }

        if let Ok(instant) = NaiveDateTime::parse_from_str(raw, DATE_TIME_FORMAT) {
            return NormalizedDate::At(instant);
        }

        let (first, second) = match self.order {
            DateOrder::MonthFirst => (MONTH_FIRST_FORMAT, DAY_FIRST_FORMAT),
            DateOrder::DayFirst => (DAY_FIRST_FORMAT, MONTH_FIRST_FORMAT),
        };

        [ISO_DATE_FORMAT, first, second]
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
            .map(|date| NormalizedDate::At(date.and_time(NaiveTime::MIN)))
            .unwrap_or(NormalizedDate::Unparseable)
    }
}

/// Normalize with the default (month-first) priority
pub fn normalize(raw: &str) -> NormalizedDate {
    DateNormalizer::new().normalize(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_is_unparseable() {
        assert_eq!(normalize(""), NormalizedDate::Unparseable);
        assert_eq!(normalize("   "), NormalizedDate::Unparseable);
    }

    #[test]
    fn test_not_specified_any_case() {
        assert!(normalize("not specified").is_unparseable());
        assert!(normalize("Not Specified").is_unparseable());
        assert!(normalize("NOT SPECIFIED").is_unparseable());
    }

    #[test]
    fn test_supported_formats_agree() {
        let expected = Some(ymd(2025, 9, 28));
        assert_eq!(normalize("2025-09-28").date(), expected);
        assert_eq!(normalize("2025-09-28 23:59:59").date(), expected);
        assert_eq!(normalize("09/28/2025").date(), expected);
        assert_eq!(normalize("28/09/2025").date(), expected);
    }

    #[test]
    fn test_date_time_keeps_time() {
        let instant = normalize("2025-09-28 23:59:59").instant().unwrap();
        assert_eq!(instant.time(), NaiveTime::from_hms_opt(23, 59, 59).unwrap());
    }

    #[test]
    fn test_date_only_is_midnight() {
        let instant = normalize("2025-09-28").instant().unwrap();
        assert_eq!(instant.time(), NaiveTime::MIN);
    }

    #[test]
    fn test_ambiguous_slash_date_is_month_first() {
        assert_eq!(normalize("03/04/2025").date(), Some(ymd(2025, 3, 4)));
    }

    #[test]
    fn test_day_first_order() {
        assert_eq!(DateNormalizer::new().order(), DateOrder::MonthFirst);

        let normalizer = DateNormalizer::with_order(DateOrder::DayFirst);
        assert_eq!(normalizer.order(), DateOrder::DayFirst);
        assert_eq!(normalizer.normalize("03/04/2025").date(), Some(ymd(2025, 4, 3)));
        // Only one reading is valid, so priority does not matter
        assert_eq!(normalizer.normalize("09/28/2025").date(), Some(ymd(2025, 9, 28)));
    }

    #[test]
    fn test_relative_phrases_are_unparseable() {
        assert!(normalize("Week 3").is_unparseable());
        assert!(normalize("TBA").is_unparseable());
        assert!(normalize("September 28, 2025").is_unparseable());
        assert!(normalize("2025-09-28T23:59:59").is_unparseable());
    }

    #[test]
    fn test_invalid_calendar_dates_are_unparseable() {
        assert!(normalize("2025-02-30").is_unparseable());
        assert!(normalize("13/13/2025").is_unparseable());
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert_eq!(normalize("  2025-09-28\n").date(), Some(ymd(2025, 9, 28)));
    }

    proptest! {
        #[test]
        fn normalize_is_deterministic(raw in ".{0,40}") {
            prop_assert_eq!(normalize(&raw), normalize(&raw));
        }

        #[test]
        fn iso_dates_round_trip(y in 1900i32..2100, m in 1u32..=12, d in 1u32..=28) {
            let raw = format!("{:04}-{:02}-{:02}", y, m, d);
            prop_assert_eq!(normalize(&raw).date(), Some(ymd(y, m, d)));
        }
    }
}
