//! Command implementations.

pub mod calendar;
pub mod deadlines;
pub mod process;
pub mod serve;
pub mod text;

pub use self::calendar::execute_calendar;
pub use self::deadlines::execute_deadlines;
pub use self::process::execute_process;
pub use self::serve::execute_serve;
pub use self::text::execute_text;

use crate::error::{CliError, Result};
use syllabus_domain::DeadlineCollection;
use syllabus_server::config::AppConfig;
use syllabus_store::JsonFileStore;

/// Message shown when nothing has been processed yet
pub const NO_DEADLINES_MESSAGE: &str =
    "No deadlines found. Run 'syllabus process <FILES>' first.";

/// Open the configured store and read the collection, failing if absent
pub(crate) fn load_collection(config: &AppConfig) -> Result<DeadlineCollection> {
    use syllabus_domain::traits::DeadlineStore;

    let store = JsonFileStore::new(&config.data_dir)?;
    store
        .load_existing()?
        .ok_or_else(|| CliError::NotFound(NO_DEADLINES_MESSAGE.to_string()))
}
