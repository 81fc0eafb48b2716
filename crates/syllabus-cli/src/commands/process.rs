//! Process command implementation.

use crate::cli::ProcessArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use syllabus_extractor::{BatchReport, Document, DocumentResult, Extractor};
use syllabus_llm::LlmProvider;
use syllabus_server::config::AppConfig;
use syllabus_store::JsonFileStore;
use tracing::warn;

/// Execute the process command.
pub async fn execute_process(args: ProcessArgs, config: &AppConfig, formatter: &Formatter) -> Result<()> {
    let provider = config.llm.build_provider()?;
    if !provider.has_api_key() {
        return Err(CliError::Config(format!(
            "{} is not set",
            config.llm.api_key_env
        )));
    }

    let report = process_files(&args.files, config, Arc::new(provider)).await?;
    println!("{}", formatter.format_report(&report, args.format)?);
    Ok(())
}

/// Read, extract and store each file
///
/// Every path gets one entry in the report, in the order given. Files that
/// cannot be read or have a rejected extension are reported without reaching
/// the extractor.
pub async fn process_files(
    files: &[PathBuf],
    config: &AppConfig,
    llm: Arc<dyn LlmProvider>,
) -> Result<BatchReport> {
    let store = JsonFileStore::new(&config.data_dir)?;
    let extractor = Extractor::new(llm, store, config.extractor.clone());
    let mut report = BatchReport::new();

    for path in files {
        let filename = display_name(path);

        if !config.is_allowed(&filename) {
            warn!("Skipping '{}': unsupported file type", path.display());
            report.push(DocumentResult::rejected(
                filename,
                format!(
                    "Invalid file type (allowed: {})",
                    config.allowed_extensions.join(", ")
                ),
            ));
            continue;
        }

        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Skipping '{}': {}", path.display(), e);
                report.push(DocumentResult::rejected(filename, format!("Failed to read file: {}", e)));
                continue;
            }
        };

        report.push(extractor.process_item(Document::from_upload(filename, bytes)).await?);
    }

    Ok(report)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
