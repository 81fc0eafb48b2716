//! Syllabus Server binary
//!
//! Starts the HTTP server. `syllabus serve` in the CLI does the same.

use std::env;
use std::process;
use syllabus_server::{config::AppConfig, start_server, ServerError};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        AppConfig::from_file(&args[2])?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        AppConfig::default()
    };

    start_server(config.with_env_overrides()?).await
}

fn print_help() {
    println!("Syllabus Server - extract deadlines from syllabi and serve them as a calendar");
    println!();
    println!("USAGE:");
    println!("    syllabus-server [--config <path-to-config.toml>]");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("ENVIRONMENT:");
    println!("    OPENAI_API_KEY     API key for the extraction service (see [llm] api_key_env)");
    println!("    PORT               Overrides bind_port");
    println!("    RUST_LOG           Log filter (default: info)");
    println!();
}
