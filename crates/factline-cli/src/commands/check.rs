//! Check command implementation.

use crate::cli::InputArgs;
use crate::commands::read_input;
use crate::error::Result;
use crate::output::Formatter;
use factline_domain::traits::{TextGenerator, WebSearch};
use factline_pipeline::FactChecker;

/// Execute the check command.
pub async fn execute_check<G, W>(args: InputArgs, checker: &FactChecker<G, W>, formatter: &Formatter) -> Result<()>
where
    G: TextGenerator,
    W: WebSearch,
{
    let text = read_input(&args)?;
    let report = checker.check_text(&text).await?;

    println!("{}", formatter.format_report(&report)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::error::CliError;
    use factline_domain::SearchHit;
    use factline_llm::MockProvider;
    use factline_pipeline::{PipelineConfig, Stage};
    use factline_search::MockSearch;
    use std::sync::Arc;

    fn args(text: &str) -> InputArgs {
        InputArgs {
            text: Some(text.to_string()),
            file: None,
            stdin: false,
        }
    }

    #[tokio::test]
    async fn test_check_runs_full_pipeline() {
        let mut llm = MockProvider::default();
        llm.add_response(
            "Text to analyze:",
            r#"{"claims": [{"claim": "Water boils at 100 degrees Celsius at sea level.", "exactText": "Water boils at 100 degrees Celsius.", "searchQuery": "At what temperature does water boil?"}]}"#,
        );
        llm.add_response(
            "Search Query Used:",
            r#"{"status": "supported", "confidence": 95, "explanation": "Standard value {{1}}.", "suggestedFix": null,
                "citedSources": [{"sourceNumber": 1, "stance": "support", "agreementPercentage": 95, "pertinence": 95, "relevantSnippet": "100 °C"}]}"#,
        );
        let search = MockSearch::new(vec![SearchHit::new("https://example.org/boiling", "Water boils at 100 °C.")]);
        let checker = FactChecker::new(Arc::new(llm.clone()), Arc::new(search.clone()), PipelineConfig::default()).unwrap();
        let formatter = Formatter::new(OutputFormat::Table, false);

        execute_check(args("Water boils at 100 degrees Celsius."), &checker, &formatter)
            .await
            .unwrap();
        assert_eq!(llm.call_count(), 2);
        assert_eq!(search.queries(), vec!["At what temperature does water boil?".to_string()]);
    }

    #[tokio::test]
    async fn test_check_reports_extraction_failure() {
        let llm = MockProvider::new("not json");
        let checker = FactChecker::new(Arc::new(llm), Arc::new(MockSearch::default()), PipelineConfig::default()).unwrap();
        let formatter = Formatter::new(OutputFormat::Table, false);

        let result = execute_check(args("Some text."), &checker, &formatter).await;
        match result {
            Err(CliError::Pipeline(e)) => assert_eq!(e.stage, Stage::Extraction),
            other => panic!("Expected pipeline error, got {:?}", other),
        }
    }
}
