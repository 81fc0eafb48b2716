//! Syllabus CLI library.
//!
//! Command definitions, configuration loading, command execution and output
//! formatting for the `syllabus` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::load_config;
pub use error::{CliError, Result};
pub use output::Formatter;
