//! Text command implementation.

use crate::cli::TextArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use syllabus_extractor::extract_pdf_text;

/// Execute the text command.
pub async fn execute_text(args: TextArgs, formatter: &Formatter) -> Result<()> {
    let bytes = tokio::fs::read(&args.pdf).await?;

    let text = tokio::task::spawn_blocking(move || extract_pdf_text(&bytes))
        .await
        .map_err(|e| CliError::InvalidInput(e.to_string()))?
        .map_err(CliError::InvalidInput)?;

    if text.is_empty() {
        eprintln!("{}", formatter.warning("PDF opened but no text extracted"));
    } else {
        println!("{}", text);
    }
    Ok(())
}
