//! Search command implementation.

use crate::cli::SearchArgs;
use crate::error::Result;
use crate::output::Formatter;
use factline_domain::traits::{TextGenerator, WebSearch};
use factline_pipeline::FactChecker;

/// Execute the search command.
pub async fn execute_search<G, W>(args: SearchArgs, checker: &FactChecker<G, W>, formatter: &Formatter) -> Result<()>
where
    G: TextGenerator,
    W: WebSearch,
{
    let sources = checker.search(&args.query).await?;

    println!("{}", formatter.format_sources(&sources)?);

    Ok(())
}
