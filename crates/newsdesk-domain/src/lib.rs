//! Newsdesk Domain Layer
//!
//! Value types and trait boundaries for the article analysis pipeline.
//! Nothing in this crate performs I/O; backends and transports live in
//! other crates and plug in through [`traits::LlmProvider`].
//!
//! ## Key Concepts
//!
//! - **NormalizedArticle**: whitespace-normalized article text, ready for prompting
//! - **EntityBundle**: the four fixed categories of geopolitical entities
//! - **AnalysisResult**: a summary paired with one entity bundle
//! - **LlmProvider**: the chat-completion boundary to the model backend
//!
//! All values are created per request and never mutated after construction.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod article;
pub mod entities;
pub mod traits;

// Re-exports for convenience
pub use analysis::AnalysisResult;
pub use article::{normalize, NormalizedArticle};
pub use entities::{EntityBundle, EntityCategory};
pub use traits::{CompletionRequest, LlmProvider};
