//! Prompt engineering for claim verification

use factline_domain::Source;

/// Builds the verification prompt for one claim
pub struct PromptBuilder<'a> {
    claim: &'a str,
    search_query: &'a str,
    sources: &'a [Source],
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(claim: &'a str, search_query: &'a str, sources: &'a [Source]) -> Self {
        Self {
            claim,
            search_query,
            sources,
        }
    }

    /// Build the complete verification prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(VERIFICATION_INSTRUCTIONS);
        prompt.push_str("\n\n");

        prompt.push_str("Claim:\n");
        prompt.push_str(self.claim);
        prompt.push_str("\n\n");

        prompt.push_str("Search Query Used:\n");
        prompt.push_str(self.search_query);
        prompt.push_str("\n\n");

        prompt.push_str("Sources:\n");
        if self.sources.is_empty() {
            prompt.push_str("(none: the search returned no evidence; the status must be \"insufficient information\")\n");
        } else {
            let sources_json = serde_json::to_string_pretty(self.sources)
                .unwrap_or_else(|_| "[]".to_string());
            prompt.push_str(&sources_json);
            prompt.push('\n');
        }

        prompt
    }
}

const VERIFICATION_INSTRUCTIONS: &str = r#"You are an expert fact-checker. Given a claim and its sources, verify the claim comprehensively.
Read the claim, the search query and every source carefully, then produce the verification result following the schema exactly.

Status:
- "supported": multiple or credible sources directly confirm the claim.
- "contradicted": reliable sources directly disprove the claim.
- "debated": credible sources conflict with each other.
- "insufficient information": the sources do not provide adequate evidence either way.

Confidence: an integer from 0 to 100 expressing your overall certainty in the status.

Explanation:
- Justify the status in a few sentences.
- Cite sources inline with markers like {{1}} or {{2}}, where the number is the source's sourceNumber.
- Every marker must have an entry in citedSources, and every entry in citedSources must be cited at least once.

suggestedFix: when the status is "contradicted", a neutral corrected version of the claim that incorporates the counter-evidence. Otherwise null.

citedSources, one entry per source you rely on:
- "sourceNumber": the sourceNumber of the source.
- "stance": "support", "contradict", "not relevant" or "unclear".
- "agreementPercentage": 0 to 100, how strongly this source agrees with the claim.
- "pertinence": 0 to 100, how relevant the source is to the claim regardless of stance.
- "relevantSnippet": a verbatim quote from the source's sourceText."#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_includes_claim_query_and_sources() {
        let sources = vec![Source {
            url: "https://www.toureiffel.paris/en".to_string(),
            title: Some("Eiffel Tower".to_string()),
            source_number: 1,
            source_text: "330 metres including antennas".to_string(),
        }];
        let prompt = PromptBuilder::new(
            "The Eiffel Tower's height is 330 meters.",
            "What is the height of the Eiffel Tower?",
            &sources,
        )
        .build();

        assert!(prompt.contains("Claim:\nThe Eiffel Tower's height is 330 meters."));
        assert!(prompt.contains("Search Query Used:\nWhat is the height of the Eiffel Tower?"));
        assert!(prompt.contains("\"sourceNumber\": 1"));
        assert!(prompt.contains("\"sourceText\": \"330 metres including antennas\""));
        assert!(prompt.contains("{{1}}"));
    }

    #[test]
    fn test_prompt_without_sources() {
        let prompt = PromptBuilder::new("claim", "query?", &[]).build();
        assert!(prompt.contains("the search returned no evidence"));
    }
}
