//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Syllabus CLI - extract deadlines from course syllabi and export a calendar.
#[derive(Debug, Parser)]
#[command(name = "syllabus")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path (TOML)
    #[arg(short, long, global = true, env = "SYLLABUS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Extract deadlines from syllabus files and store them
    Process(ProcessArgs),

    /// Generate an .ics calendar from the stored deadlines
    Calendar(CalendarArgs),

    /// List the stored deadlines
    Deadlines(DeadlinesArgs),

    /// Print the text extracted from a PDF
    Text(TextArgs),
}

/// Arguments for the serve command.
#[derive(Debug, Parser)]
pub struct ServeArgs {
    /// Port to listen on (overrides config and PORT)
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Arguments for the process command.
#[derive(Debug, Parser)]
pub struct ProcessArgs {
    /// Syllabus files to process
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output format for the report
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: CliFormat,
}

/// Arguments for the calendar command.
#[derive(Debug, Parser)]
pub struct CalendarArgs {
    /// Where to write the calendar (default: <data_dir>/schedule.ics)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the deadlines command.
#[derive(Debug, Parser)]
pub struct DeadlinesArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: CliFormat,
}

/// Arguments for the text command.
#[derive(Debug, Parser)]
pub struct TextArgs {
    /// PDF file to read
    pub pdf: PathBuf,
}
