//! Error types for the Analyzer

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during article analysis
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// Article too short to be worth a backend call
    #[error("Article text is too short: {length} chars (minimum: {minimum})")]
    InvalidInput {
        /// Length of the trimmed article, in characters
        length: usize,
        /// Configured minimum
        minimum: usize,
    },

    /// LLM backend transport, auth or rate-limit failure
    #[error("LLM backend error: {0}")]
    Backend(String),

    /// Backend call exceeded the per-request timeout
    #[error("LLM call timed out after {0:?}")]
    Timeout(Duration),

    /// Backend output was not the JSON shape that was asked for
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A sub-task failed without recovering, so no result was produced
    #[error("Analysis failed: {0}")]
    AnalysisFailed(#[source] Box<AnalyzerError>),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AnalyzerError {
    /// True for errors caused by the caller's input rather than the system
    pub fn is_client_error(&self) -> bool {
        matches!(self, AnalyzerError::InvalidInput { .. })
    }
}

impl From<serde_json::Error> for AnalyzerError {
    fn from(e: serde_json::Error) -> Self {
        AnalyzerError::MalformedResponse(e.to_string())
    }
}
