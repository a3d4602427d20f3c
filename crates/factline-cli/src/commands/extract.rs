//! Extract command implementation.

use crate::cli::InputArgs;
use crate::commands::read_input;
use crate::error::Result;
use crate::output::Formatter;
use factline_domain::traits::{TextGenerator, WebSearch};
use factline_pipeline::FactChecker;

/// Execute the extract command.
pub async fn execute_extract<G, W>(args: InputArgs, checker: &FactChecker<G, W>, formatter: &Formatter) -> Result<()>
where
    G: TextGenerator,
    W: WebSearch,
{
    let text = read_input(&args)?;
    let result = checker.extract(&text).await?;

    println!("{}", formatter.format_claims(&result.claims)?);

    let dropped = result.failures.len();
    if dropped > 0 {
        eprintln!(
            "{}",
            formatter.warning(&format!("{} extracted claim(s) were dropped", dropped))
        );
    }

    Ok(())
}
