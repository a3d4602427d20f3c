//! Prompt engineering for claim extraction

/// Builds the extraction prompt for one submission
pub struct PromptBuilder<'a> {
    text: &'a str,
    max_claims: Option<usize>,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            max_claims: None,
        }
    }

    /// Ask the model to focus on at most `n` major claims
    pub fn with_claim_hint(mut self, n: usize) -> Self {
        self.max_claims = Some(n);
        self
    }

    /// Build the complete extraction prompt
    pub fn build(&self) -> String {
        let mut prompt = String::with_capacity(EXTRACTION_INSTRUCTIONS.len() + self.text.len() + 512);

        prompt.push_str(EXTRACTION_INSTRUCTIONS);
        prompt.push_str("\n\n");

        if let Some(n) = self.max_claims {
            prompt.push_str(&format!(
                "If the text contains more than {} claims, prefer the {} most significant ones.\n\n",
                n, n
            ));
        }

        prompt.push_str("Text to analyze:\n");
        prompt.push_str("---\n");
        prompt.push_str(self.text);
        prompt.push_str("\n---\n\n");

        prompt.push_str(OUTPUT_FORMAT_REMINDER);
        prompt
    }
}

const EXTRACTION_INSTRUCTIONS: &str = r#"You are an expert at extracting verifiable factual claims from text.
Identify every claim in the text, true or false, that could be checked against independent sources.

For each claim provide three fields:

- "claim": a fully self-contained restatement of the assertion.
  - Resolve every pronoun to the entity it refers to.
  - Never write "this technique", "the company" or similar references; name the thing.
  - Expand all abbreviations and make implicit subjects explicit.
  - Be specific enough that the claim can be searched and verified without seeing the text.
- "exactText": the exact, continuous span of the text the claim comes from.
  - Copy it character for character, including punctuation and capitalisation.
  - Use a single span of roughly 5 to 25 words. Never join separate fragments.
- "searchQuery": a well-formed question that would retrieve evidence for or against the claim.
  - Start with What, How, Does, Is, When, Where or Who and end with a question mark.
  - Include the concrete entities, numbers and dates from the claim.

Skip opinions, predictions and questions; extract only statements of fact."#;

const OUTPUT_FORMAT_REMINDER: &str = r#"Output format (a JSON object only, no additional text):
{
  "claims": [
    {
      "claim": "self-contained claim",
      "exactText": "verbatim span from the text",
      "searchQuery": "What ...?"
    }
  ]
}

Return an empty "claims" array when the text makes no verifiable claims."#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_includes_text() {
        let prompt = PromptBuilder::new("The Eiffel Tower is 330 meters tall.").build();
        assert!(prompt.contains("---\nThe Eiffel Tower is 330 meters tall.\n---"));
    }

    #[test]
    fn test_prompt_includes_field_rules() {
        let prompt = PromptBuilder::new("Test").build();
        assert!(prompt.contains("\"exactText\""));
        assert!(prompt.contains("\"searchQuery\""));
        assert!(prompt.contains("Resolve every pronoun"));
        assert!(prompt.contains("\"claims\": ["));
    }

    #[test]
    fn test_claim_hint_is_optional() {
        let plain = PromptBuilder::new("Test").build();
        assert!(!plain.contains("most significant"));

        let hinted = PromptBuilder::new("Test").with_claim_hint(5).build();
        assert!(hinted.contains("more than 5 claims"));
    }
}
