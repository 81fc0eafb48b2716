//! Configuration loading for the CLI.
//!
//! The CLI reads the same TOML file as the server, so `syllabus process` and
//! `syllabus serve` share one data directory and one set of LLM settings.

use crate::error::Result;
use std::path::Path;
use syllabus_server::config::AppConfig;

/// Load configuration from `path`, or defaults when none is given
///
/// `PORT` from the environment is applied afterwards.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };
    Ok(config.with_env_overrides()?)
}
