//! Deadlines command implementation.

use super::load_collection;
use crate::cli::DeadlinesArgs;
use crate::error::Result;
use crate::output::Formatter;
use syllabus_server::config::AppConfig;

/// Execute the deadlines command.
pub fn execute_deadlines(args: DeadlinesArgs, config: &AppConfig, formatter: &Formatter) -> Result<()> {
    let collection = load_collection(config)?;
    println!("{}", formatter.format_deadlines(&collection, args.format)?);
    Ok(())
}
