//! Configuration for calendar materialization

use serde::{Deserialize, Serialize};
use syllabus_domain::DateOrder;

/// Default calendar display name
pub const DEFAULT_CALENDAR_NAME: &str = "Syllabus Deadlines";

/// Configuration for the Materializer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    /// Display name written to the calendar (`X-WR-CALNAME`)
    pub calendar_name: String,

    /// Length of exam events in hours
    pub exam_duration_hours: u32,

    /// How ambiguous `NN/NN/YYYY` dates are read
    pub date_order: DateOrder,
}

impl CalendarConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.calendar_name.trim().is_empty() {
            return Err("calendar_name must not be empty".to_string());
        }
        if self.exam_duration_hours == 0 || self.exam_duration_hours > 24 {
            return Err(format!(
                "exam_duration_hours must be between 1 and 24, got {}",
                self.exam_duration_hours
            ));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            calendar_name: DEFAULT_CALENDAR_NAME.to_string(),
            exam_duration_hours: 2,
            date_order: DateOrder::MonthFirst,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = CalendarConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.exam_duration_hours, 2);
    }

    #[test]
    fn test_invalid_exam_duration() {
        let config = CalendarConfig {
            exam_duration_hours: 0,
            ..CalendarConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_name_rejected() {
        let config = CalendarConfig {
            calendar_name: "  ".to_string(),
            ..CalendarConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_date_order_from_toml() {
        let config = CalendarConfig::from_toml("date_order = \"day_first\"").unwrap();
        assert_eq!(config.date_order, DateOrder::DayFirst);
        assert_eq!(config.calendar_name, DEFAULT_CALENDAR_NAME);
    }
}
