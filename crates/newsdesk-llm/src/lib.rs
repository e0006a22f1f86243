//! Newsdesk LLM Provider Layer
//!
//! Pluggable LLM provider implementations.
//!
//! # Architecture
//!
//! This crate provides implementations of the `LlmProvider` trait from `newsdesk-domain`.
//! Every provider speaks the same chat-completion shape: a system instruction,
//! a user prompt, an output token cap and a sampling temperature.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OpenAiProvider`: OpenAI (or any OpenAI-compatible) chat completions API
//!
//! # Examples
//!
//! ```
//! use newsdesk_llm::MockProvider;
//! use newsdesk_domain::{CompletionRequest, LlmProvider};
//!
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! let provider = MockProvider::new("Hello from LLM!");
//! let request = CompletionRequest::new("system", "test prompt");
//! let result = rt.block_on(provider.complete(&request)).unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! ```

#![warn(missing_docs)]

pub mod openai;

use async_trait::async_trait;
use newsdesk_domain::{CompletionRequest, LlmProvider};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use thiserror::Error;

pub use openai::{OpenAiConfig, OpenAiProvider};

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Credentials rejected by the backend
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Provider misconfigured
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Fail(String),
}

/// Mock LLM provider for deterministic testing
///
/// Returns pre-configured responses without making any network calls.
/// Responses are keyed by the request's system instruction, which is what
/// distinguishes the pipeline's different calls from one another.
///
/// # Examples
///
/// ```
/// use newsdesk_llm::MockProvider;
/// use newsdesk_domain::{CompletionRequest, LlmProvider};
///
/// let rt = tokio::runtime::Runtime::new().unwrap();
///
/// let mut provider = MockProvider::default();
/// provider.add_response("summarizer", "A summary.");
/// provider.add_error("extractor");
///
/// let ok = rt.block_on(provider.complete(&CompletionRequest::new("summarizer", "..."))).unwrap();
/// assert_eq!(ok, "A summary.");
///
/// let err = rt.block_on(provider.complete(&CompletionRequest::new("extractor", "...")));
/// assert!(err.is_err());
/// assert_eq!(provider.call_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, MockReply>>>,
    delays: Arc<Mutex<HashMap<String, Duration>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all requests
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            delays: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a specific response for requests with the given system instruction
    pub fn add_response(&mut self, system: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(system.into(), MockReply::Text(response.into()));
    }

    /// Configure to return an error for the given system instruction
    pub fn add_error(&mut self, system: impl Into<String>) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(system.into(), MockReply::Fail("Mock error".to_string()));
    }

    /// Delay responses for the given system instruction, simulating latency
    pub fn add_delay(&mut self, system: impl Into<String>, delay: Duration) {
        self.delays
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(system.into(), delay);
    }

    /// Get the number of times complete was called
    pub fn call_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Every request received so far, in arrival order
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Reset the recorded requests
    pub fn reset_call_count(&self) {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    type Error = LlmError;

    async fn complete(&self, request: &CompletionRequest) -> Result<String, Self::Error> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        let delay = self
            .delays
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&request.system)
            .copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let reply = self
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&request.system)
            .cloned();

        match reply {
            Some(MockReply::Text(response)) => Ok(response),
            Some(MockReply::Fail(message)) => Err(LlmError::Other(message)),
            None => Ok(self.default_response.clone()),
        }
    }
}
