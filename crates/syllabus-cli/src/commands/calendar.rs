//! Calendar command implementation.

use super::load_collection;
use crate::cli::CalendarArgs;
use crate::error::Result;
use crate::output::Formatter;
use std::path::Path;
use syllabus_calendar::{Materialization, Materializer};
use syllabus_server::config::AppConfig;
use syllabus_store::write_atomic;

/// Execute the calendar command.
pub fn execute_calendar(args: CalendarArgs, config: &AppConfig, formatter: &Formatter) -> Result<()> {
    let output = args.output.unwrap_or_else(|| config.schedule_path());
    let materialization = write_calendar(config, &output)?;

    println!(
        "{}",
        formatter.calendar_written(&materialization, &output.display().to_string())
    );
    Ok(())
}

/// Materialize the stored collection and write it to `output`
pub fn write_calendar(config: &AppConfig, output: &Path) -> Result<Materialization> {
    let collection = load_collection(config)?;
    let (materialization, ics) = Materializer::new(config.calendar.clone()).render(&collection);
    write_atomic(output, ics.as_bytes())?;
    Ok(materialization)
}
