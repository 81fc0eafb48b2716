//! Configuration file parsing for the server.
//!
//! Loads settings from TOML files: bind address, data directory, upload
//! limits, and the `[llm]`, `[extractor]` and `[calendar]` sections. Every
//! field has a default, so an empty file (or no file) is a valid config.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use syllabus_calendar::CalendarConfig;
use syllabus_extractor::ExtractorConfig;
use syllabus_llm::{openai, LlmError, OpenAiProvider};
use thiserror::Error;

/// Environment variable that overrides `bind_port`
pub const PORT_ENV: &str = "PORT";

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A value is out of range or inconsistent
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Application configuration loaded from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Bind address (e.g., "0.0.0.0")
    pub bind_address: String,

    /// Bind port (e.g., 5000)
    pub bind_port: u16,

    /// Directory holding the deadline JSON files and `schedule.ics`
    pub data_dir: PathBuf,

    /// Request body ceiling for uploads, in bytes
    pub max_upload_bytes: usize,

    /// Accepted upload extensions, lowercase, without the dot
    pub allowed_extensions: Vec<String>,

    /// File name offered when the calendar is downloaded
    pub download_name: String,

    /// Extraction service settings
    pub llm: LlmConfig,

    /// Orchestrator settings
    pub extractor: ExtractorConfig,

    /// Calendar settings
    pub calendar: CalendarConfig,
}

/// Extraction service settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// API base URL
    pub endpoint: String,

    /// Model name
    pub model: String,

    /// Environment variable holding the API key
    pub api_key_env: String,

    /// HTTP timeout per request (seconds)
    pub timeout_secs: u64,

    /// Attempts per request, including the first
    pub max_retries: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: openai::DEFAULT_ENDPOINT.to_string(),
            model: openai::DEFAULT_MODEL.to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_secs: openai::DEFAULT_TIMEOUT_SECS,
            max_retries: openai::DEFAULT_MAX_RETRIES,
        }
    }
}

impl LlmConfig {
    /// Build the HTTP provider, reading the key from `api_key_env`
    ///
    /// A missing key is not reported here; the first extraction fails with a
    /// configuration error instead, so the server can still start and serve
    /// calendars.
    pub fn build_provider(&self) -> Result<OpenAiProvider, LlmError> {
        let api_key = std::env::var(&self.api_key_env).ok();
        OpenAiProvider::new(&self.endpoint, &self.model, api_key)?
            .with_api_key_env(&self.api_key_env)
            .with_max_retries(self.max_retries)
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            bind_port: 5000,
            data_dir: PathBuf::from("extracted_deadlines"),
            max_upload_bytes: 16 * 1024 * 1024,
            allowed_extensions: vec!["pdf".to_string()],
            download_name: "syllabus_schedule.ics".to_string(),
            llm: LlmConfig::default(),
            extractor: ExtractorConfig::default(),
            calendar: CalendarConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        Ok(config)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `PORT` from the environment, if set
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        match std::env::var(PORT_ENV) {
            Ok(port) => self.with_port_override(&port),
            Err(_) => Ok(self),
        }
    }

    fn with_port_override(mut self, port: &str) -> Result<Self, ConfigError> {
        self.bind_port = port
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("{} is not a valid port: {:?}", PORT_ENV, port)))?;
        Ok(self)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_upload_bytes == 0 {
            return Err(ConfigError::Invalid("max_upload_bytes must be greater than 0".to_string()));
        }
        if self.allowed_extensions.is_empty() {
            return Err(ConfigError::Invalid("allowed_extensions must not be empty".to_string()));
        }
        if self.download_name.trim().is_empty() {
            return Err(ConfigError::Invalid("download_name must not be empty".to_string()));
        }
        if self.llm.api_key_env.trim().is_empty() {
            return Err(ConfigError::Invalid("llm.api_key_env must not be empty".to_string()));
        }
        self.extractor
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("extractor: {}", e)))?;
        self.calendar
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("calendar: {}", e)))?;
        Ok(())
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }

    /// Whether a file name has an accepted extension (case-insensitive)
    pub fn is_allowed(&self, filename: &str) -> bool {
        match filename.rsplit_once('.') {
            Some((_, ext)) => self
                .allowed_extensions
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext)),
            None => false,
        }
    }

    /// Where the rendered calendar is written
    pub fn schedule_path(&self) -> PathBuf {
        self.data_dir.join("schedule.ics")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syllabus_domain::DateOrder;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.bind_port, 5000);
        assert_eq!(config.max_upload_bytes, 16 * 1024 * 1024);
        assert_eq!(config.allowed_extensions, vec!["pdf"]);
        assert_eq!(config.download_name, "syllabus_schedule.ics");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bind_addr() {
        let config = AppConfig {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 8080,
            ..AppConfig::default()
        };
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            bind_address = "127.0.0.1"
            bind_port = 9000
            data_dir = "/var/lib/syllabus"
            allowed_extensions = ["pdf", "txt"]

            [llm]
            model = "gpt-4o"
            api_key_env = "SYLLABUS_KEY"

            [extractor]
            extraction_timeout_secs = 30

            [calendar]
            calendar_name = "Fall 2025"
            exam_duration_hours = 3
            date_order = "day_first"
        "#;

        let config = AppConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.bind_port, 9000);
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/syllabus"));
        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(config.llm.endpoint, openai::DEFAULT_ENDPOINT);
        assert_eq!(config.extractor.extraction_timeout_secs, 30);
        assert_eq!(config.calendar.exam_duration_hours, 3);
        assert_eq!(config.calendar.date_order, DateOrder::DayFirst);
        assert_eq!(config.max_upload_bytes, 16 * 1024 * 1024);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.bind_port, AppConfig::default().bind_port);
    }

    #[test]
    fn test_invalid_section_rejected() {
        let toml = "[calendar]\nexam_duration_hours = 0\n";
        assert!(matches!(
            AppConfig::from_toml_str(toml),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_port_override() {
        let config = AppConfig::default().with_port_override("8123").unwrap();
        assert_eq!(config.bind_port, 8123);
        assert!(AppConfig::default().with_port_override("not-a-port").is_err());
    }

    #[test]
    fn test_is_allowed() {
        let config = AppConfig::default();
        assert!(config.is_allowed("cs101.pdf"));
        assert!(config.is_allowed("CS101.PDF"));
        assert!(!config.is_allowed("notes.docx"));
        assert!(!config.is_allowed("pdf"));
    }
}
