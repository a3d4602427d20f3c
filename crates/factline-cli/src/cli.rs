//! CLI command definitions and argument parsing.

use clap::{Args, Parser, Subcommand};

/// Factline CLI - Extract factual claims from text and verify them against web sources.
#[derive(Debug, Parser)]
#[command(name = "factline")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "FACTLINE_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract and position the claims in a text
    Extract(InputArgs),

    /// Extract claims, then search and verify each one
    Check(InputArgs),

    /// Retrieve the evidence set for one query
    Search(SearchArgs),

    /// Show or create the configuration file
    Config(ConfigArgs),
}

/// Where the text to analyze comes from.
#[derive(Debug, Args)]
pub struct InputArgs {
    /// Text to analyze
    #[arg(conflicts_with_all = ["file", "stdin"])]
    pub text: Option<String>,

    /// Read the text from a file
    #[arg(short = 'i', long, conflicts_with = "stdin")]
    pub file: Option<String>,

    /// Read the text from stdin
    #[arg(long)]
    pub stdin: bool,
}

/// Arguments for the search command.
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Search query text
    pub query: String,
}

/// Arguments for configuration management.
#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}
