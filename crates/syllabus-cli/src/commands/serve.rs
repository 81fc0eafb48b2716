//! Serve command implementation.

use crate::cli::ServeArgs;
use crate::error::Result;
use syllabus_server::config::AppConfig;
use syllabus_server::start_server;

/// Execute the serve command.
pub async fn execute_serve(args: ServeArgs, mut config: AppConfig) -> Result<()> {
    if let Some(port) = args.port {
        config.bind_port = port;
    }

    start_server(config).await?;
    Ok(())
}
