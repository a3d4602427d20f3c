//! Command implementations.

pub mod check;
pub mod config;
pub mod extract;
pub mod search;

pub use self::check::execute_check;
pub use self::config::execute_config;
pub use self::extract::execute_extract;
pub use self::search::execute_search;

use crate::cli::InputArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use factline_llm::ConfiguredProvider;
use factline_pipeline::FactChecker;
use factline_search::ExaClient;
use std::fs;
use std::io::{self, Read};
use std::sync::Arc;

/// Read the text to analyze from the argument, a file or stdin.
pub fn read_input(args: &InputArgs) -> Result<String> {
    let text = if args.stdin {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else if let Some(file_path) = &args.file {
        fs::read_to_string(file_path)?
    } else if let Some(text) = &args.text {
        text.clone()
    } else {
        return Err(CliError::InvalidInput(
            "Provide the text as an argument, or use --file or --stdin".to_string(),
        ));
    };

    if text.trim().is_empty() {
        return Err(CliError::InvalidInput("Text is empty".to_string()));
    }
    Ok(text)
}

/// Build the pipeline from the configured providers.
pub fn build_checker(config: &Config) -> Result<FactChecker<ConfiguredProvider, ExaClient>> {
    let generator = Arc::new(config.llm.build()?);
    let search = Arc::new(config.search.build()?);
    Ok(FactChecker::new(generator, search, config.pipeline.clone())?)
}
