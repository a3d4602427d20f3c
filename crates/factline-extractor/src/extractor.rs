//! Core Extractor implementation

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::parser::parse_extraction_response;
use crate::prompt::PromptBuilder;
use crate::resolver::PositionResolver;
use crate::schema::extraction_schema;
use crate::types::{ExtractionMetadata, ExtractionResult};
use factline_domain::traits::TextGenerator;
use std::sync::Arc;
use std::time::Instant;
use tokio::time::timeout;
use tracing::{debug, info};

/// The Extractor turns raw text into positioned, not-yet-verified claims
///
/// One generation call covers the whole text, so failures are all-or-nothing.
pub struct Extractor<G>
where
    G: TextGenerator,
{
    generator: Arc<G>,
    config: ExtractorConfig,
}

impl<G> Extractor<G>
where
    G: TextGenerator,
{
    /// Create a new Extractor
    pub fn new(generator: Arc<G>, config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        Ok(Self { generator, config })
    }

    /// The active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract and position claims from `text`
    pub async fn extract(&self, text: &str) -> Result<ExtractionResult, ExtractorError> {
        if text.trim().is_empty() {
            return Err(ExtractorError::EmptyText);
        }
        let length = text.chars().count();
        if length > self.config.max_text_length {
            return Err(ExtractorError::TextTooLong(length, self.config.max_text_length));
        }

        let start_time = Instant::now();
        info!(text_length = length, model = self.generator.model_name(), "Starting extraction");

        let prompt = PromptBuilder::new(text)
            .with_claim_hint(self.config.max_claims)
            .build();
        debug!(prompt_chars = prompt.len(), "Extraction prompt built");

        let schema = extraction_schema();
        let response = timeout(
            self.config.extraction_timeout(),
            self.generator.generate_structured(&prompt, &schema),
        )
        .await
        .map_err(|_| ExtractorError::Timeout)?
        .map_err(|e| ExtractorError::Generation(e.to_string()))?;
        debug!(response_chars = response.len(), "Extraction response received");

        let extracted = parse_extraction_response(&response)?;
        let total = extracted.len();

        let resolution = PositionResolver::new(self.config.anchor_policy, self.config.max_claims)
            .resolve(text, extracted);
        if total > 0 && resolution.claims.is_empty() && resolution.unanchored() > 0 {
            return Err(ExtractorError::NoAnchoredClaims(total));
        }

        let processing_time_ms = start_time.elapsed().as_millis() as u64;
        info!(
            extracted = total,
            positioned = resolution.claims.len(),
            dropped = resolution.failures.len(),
            elapsed_ms = processing_time_ms,
            "Extraction complete"
        );

        Ok(ExtractionResult {
            claims: resolution.claims,
            failures: resolution.failures,
            metadata: ExtractionMetadata {
                model_name: self.generator.model_name().to_string(),
                total_claims_extracted: total,
                processing_time_ms,
            },
        })
    }
}
