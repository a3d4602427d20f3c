//! Core Verifier implementation

use crate::citations::check_citations;
use crate::config::VerifierConfig;
use crate::error::VerifierError;
use crate::parser::parse_verification_response;
use crate::prompt::PromptBuilder;
use crate::schema::verification_schema;
use crate::types::VerificationResult;
use factline_domain::traits::TextGenerator;
use factline_domain::{ClaimId, Source};
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, warn};

/// The Verifier judges one claim against its evidence set
pub struct ClaimVerifier<G>
where
    G: TextGenerator,
{
    generator: Arc<G>,
    config: VerifierConfig,
}

impl<G> ClaimVerifier<G>
where
    G: TextGenerator,
{
    /// Create a new Verifier
    pub fn new(generator: Arc<G>, config: VerifierConfig) -> Result<Self, VerifierError> {
        config.validate().map_err(VerifierError::Config)?;
        Ok(Self { generator, config })
    }

    /// The active configuration
    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Produce a validated verdict for `claim_text`
    ///
    /// Citation inconsistencies are logged, not returned as errors.
    pub async fn verify(
        &self,
        claim_id: ClaimId,
        claim_text: &str,
        search_query: &str,
        sources: &[Source],
    ) -> Result<VerificationResult, VerifierError> {
        let prompt = PromptBuilder::new(claim_text, search_query, sources).build();
        debug!(claim_id, prompt_chars = prompt.len(), sources = sources.len(), "Verification prompt built");

        let schema = verification_schema();
        let response = timeout(
            self.config.verification_timeout(),
            self.generator.generate_structured(&prompt, &schema),
        )
        .await
        .map_err(|_| VerifierError::Timeout)?
        .map_err(|e| VerifierError::Generation(e.to_string()))?;
        debug!(claim_id, response_chars = response.len(), "Verification response received");

        let result = parse_verification_response(&response)?;
        for issue in check_citations(&result, sources.len()) {
            warn!(claim_id, %issue, "Citation integrity violation");
        }
        Ok(result)
    }
}
