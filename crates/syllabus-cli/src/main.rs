//! Syllabus CLI - extract deadlines from course syllabi and export a calendar.

use clap::Parser;
use syllabus_cli::commands;
use syllabus_cli::{load_config, Cli, Command, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> syllabus_cli::Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let formatter = Formatter::new(!cli.no_color);

    match cli.command {
        Command::Serve(args) => commands::execute_serve(args, config).await?,
        Command::Process(args) => commands::execute_process(args, &config, &formatter).await?,
        Command::Calendar(args) => commands::execute_calendar(args, &config, &formatter)?,
        Command::Deadlines(args) => commands::execute_deadlines(args, &config, &formatter)?,
        Command::Text(args) => commands::execute_text(args, &formatter).await?,
    }

    Ok(())
}
