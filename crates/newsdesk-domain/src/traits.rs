//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the analysis pipeline and
//! infrastructure. Implementations live in other crates (newsdesk-llm).

use async_trait::async_trait;
use std::fmt;

/// A single chat-style completion call
///
/// Carries a system instruction, a user prompt, an output-length cap and a
/// sampling temperature.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// System instruction framing the model's role
    pub system: String,

    /// User prompt, including the article text
    pub prompt: String,

    /// Maximum number of tokens the backend may generate
    pub max_tokens: u32,

    /// Sampling temperature (lower is more deterministic)
    pub temperature: f32,

    /// Ask the backend to constrain output to a JSON object, if it can
    ///
    /// Advisory only. Callers must still treat the response as untrusted.
    pub json_output: bool,
}

impl CompletionRequest {
    /// Create a plain-text completion request
    pub fn new(system: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            prompt: prompt.into(),
            max_tokens: 256,
            temperature: 0.0,
            json_output: false,
        }
    }

    /// Set the output token cap
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Request JSON-object output
    pub fn with_json_output(mut self) -> Self {
        self.json_output = true;
        self
    }
}

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (newsdesk-llm). A provider is
/// built once per process and shared by every in-flight request, so
/// implementations must be safe for concurrent use.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Error type for LLM operations
    type Error: fmt::Display + Send;

    /// Run one completion and return the model's text
    async fn complete(&self, request: &CompletionRequest) -> Result<String, Self::Error>;
}
