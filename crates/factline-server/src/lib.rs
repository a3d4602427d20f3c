//! Factline Server
//!
//! HTTP transport for the claim checking pipeline: extraction, search and
//! verification, single-query search and stored submissions.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use config::ServerConfig;
use factline_llm::LlmError;
use factline_pipeline::{FactChecker, InMemorySubmissionStore};
use factline_search::SearchError;
use handlers::{create_router, AppState};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Text-generation provider could not be constructed
    #[error("Text-generation provider error: {0}")]
    Llm(#[from] LlmError),

    /// Search client could not be constructed
    #[error("Search client error: {0}")]
    Search(#[from] SearchError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Start the HTTP server
///
/// Builds the configured providers and the pipeline, then serves until the
/// process is stopped.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    config.validate()?;

    info!("Starting Factline server");
    info!("Bind address: {}", config.bind_addr());
    info!(
        max_claims = config.pipeline.extractor.max_claims,
        results_per_claim = config.pipeline.retriever.results_per_claim,
        max_concurrent_claims = config.pipeline.max_concurrent_claims,
        max_submissions = config.max_submissions,
        "Pipeline configured"
    );

    let generator = Arc::new(config.llm.build()?);
    let search = Arc::new(config.search.build()?);
    let checker = FactChecker::new(generator, search, config.pipeline.clone())
        .map_err(|e| config::ConfigError::Invalid(e.0))?;

    let store = InMemorySubmissionStore::with_capacity(config.max_submissions);
    let app = create_router(AppState::with_store(checker, store));

    // Bind and serve
    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}
