//! Factline Server binary
//!
//! Starts the HTTP server for claim extraction and verification.

use factline_server::{config::ServerConfig, start_server, ServerError};
use std::env;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Log to stderr, RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    // Parse command-line arguments
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        ServerConfig::from_file(&args[2])?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        eprintln!("Warning: No config file specified, using defaults");
        eprintln!("Usage: factline-server --config <path-to-factline.toml>");
        eprintln!();
        ServerConfig::default()
    };

    start_server(config).await?;

    Ok(())
}

fn print_help() {
    println!("Factline Server - Claim extraction and verification over HTTP");
    println!();
    println!("USAGE:");
    println!("    factline-server --config <path-to-factline.toml>");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("CONFIGURATION:");
    println!("    The TOML config file may contain:");
    println!("    - bind_address, bind_port: listen address (default 127.0.0.1:8080)");
    println!("    - [pipeline]: claim limits, results per claim, timeouts, concurrency");
    println!("    - [llm]: provider (openai or ollama), model, api_key_env");
    println!("    - [search]: api_key_env for the search service");
    println!();
    println!("ENVIRONMENT:");
    println!("    OPENAI_API_KEY, EXA_API_KEY    API keys (names configurable)");
    println!("    RUST_LOG                       Log filter (default: info)");
    println!();
}
