//! Newsdesk Analyzer
//!
//! Turns a news article into a short summary and a set of geopolitical
//! entities using an LLM backend.
//!
//! # Overview
//!
//! The pipeline makes two independent backend calls per article, one for
//! the summary and one for the entities, and runs them concurrently. The
//! summary is the primary deliverable: if it fails, the analysis fails.
//! Entity extraction is best-effort: its response is untrusted free-form
//! text, parsed field by field, and any failure degrades to empty
//! categories instead of an error.
//!
//! # Architecture
//!
//! ```text
//!                      ┌→ Summarizer ───────→ summary ─┐
//! Text → normalize → Analyzer                          ├→ AnalysisResult
//!                      └→ EntityExtractor ──→ bundle ──┘
//! ```
//!
//! # Example Usage
//!
//! ```
//! use newsdesk_analyzer::{Analyzer, AnalyzerConfig, ENTITY_SYSTEM, SUMMARY_SYSTEM};
//! use newsdesk_llm::MockProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut llm = MockProvider::default();
//! llm.add_response(SUMMARY_SYSTEM, "France and Germany met in Paris.");
//! llm.add_response(ENTITY_SYSTEM, r#"{"countries": ["France", "Germany"]}"#);
//!
//! let analyzer = Analyzer::new(llm, AnalyzerConfig::default())?;
//! let result = analyzer
//!     .analyze_text("Breaking news: the leaders of France and Germany met today in Paris to discuss trade.")
//!     .await?;
//!
//! assert_eq!(result.summary, "France and Germany met in Paris.");
//! assert_eq!(result.entities.countries.len(), 2);
//! # Ok(())
//! # }
//! # tokio::runtime::Runtime::new().unwrap().block_on(example()).unwrap();
//! ```

#![warn(missing_docs)]

mod analyzer;
mod backend;
mod config;
mod error;
mod extractor;
mod parser;
mod prompt;
mod summarizer;

#[cfg(test)]
mod tests;

pub use analyzer::Analyzer;
pub use config::{AnalyzerConfig, GenerationSettings};
pub use error::AnalyzerError;
pub use extractor::EntityExtractor;
pub use parser::parse_entity_response;
pub use prompt::{entity_request, summary_request, ENTITY_SYSTEM, SUMMARY_SYSTEM};
pub use summarizer::Summarizer;
