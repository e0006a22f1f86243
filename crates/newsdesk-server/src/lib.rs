//! Newsdesk Server
//!
//! HTTP front end for the article analysis pipeline. Accepts uploaded
//! `.txt`/`.docx` files or pasted text and returns a summary together with
//! the geopolitical entities found in the article.

#![warn(missing_docs)]

pub mod config;
pub mod document;
pub mod handlers;

use config::{ConfigError, ServerConfig};
use handlers::{create_router, AppState};
use newsdesk_analyzer::{Analyzer, AnalyzerError};
use newsdesk_llm::{LlmError, OpenAiConfig, OpenAiProvider};
use tokio::net::TcpListener;
use tracing::info;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Backend provider could not be built
    #[error("LLM provider error: {0}")]
    Provider(#[from] LlmError),

    /// Analyzer rejected its settings
    #[error("Analyzer error: {0}")]
    Analyzer(#[from] AnalyzerError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Build the OpenAI-backed analyzer described by the configuration
pub fn build_analyzer(config: &ServerConfig) -> Result<Analyzer<OpenAiProvider>, ServerError> {
    let mut provider_config = OpenAiConfig::new(config.openai.api_key.clone())
        .with_timeout(config.analyzer.request_timeout());
    if let Some(base_url) = &config.openai.base_url {
        provider_config = provider_config.with_base_url(base_url.clone());
    }
    if let Some(model) = &config.openai.model {
        provider_config = provider_config.with_model(model.clone());
    }

    let provider = OpenAiProvider::new(provider_config)?;
    info!("Using model {}", provider.model());

    Ok(Analyzer::new(provider, config.analyzer.clone())?)
}

/// Start the HTTP server
///
/// Builds the provider once, binds, and serves until Ctrl-C.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    info!("Starting Newsdesk server ({})", config.environment);
    info!("Bind address: {}", config.bind_addr());
    info!("CORS origins: {}", config.cors_origins.join(", "));

    let analyzer = build_analyzer(&config)?;
    let app = create_router(AppState::new(analyzer), &config);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
