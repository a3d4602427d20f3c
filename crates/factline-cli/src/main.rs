//! Factline CLI - Extract and verify factual claims from the command line.

use clap::Parser;
use factline_cli::cli::{ConfigAction, ConfigArgs};
use factline_cli::commands;
use factline_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Logs go to stderr so that stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> factline_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    let config_path = Config::resolve_path(cli.config.as_deref())?;
    // `config init` must still work when the existing file is broken
    let config = match (&cli.command, Config::load_from(&config_path)) {
        (Command::Config(ConfigArgs { action: ConfigAction::Init { .. } }), Err(_)) => Config::default(),
        (_, loaded) => loaded?,
    };

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;
    if !color_enabled {
        colored::control::set_override(false);
    }

    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Config(args) => {
            commands::execute_config(args, &config, &config_path, &formatter)?;
        }
        Command::Extract(args) => {
            let checker = commands::build_checker(&config)?;
            commands::execute_extract(args, &checker, &formatter).await?;
        }
        Command::Check(args) => {
            let checker = commands::build_checker(&config)?;
            commands::execute_check(args, &checker, &formatter).await?;
        }
        Command::Search(args) => {
            let checker = commands::build_checker(&config)?;
            commands::execute_search(args, &checker, &formatter).await?;
        }
    }

    Ok(())
}
