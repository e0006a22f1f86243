//! Core Analyzer implementation

use crate::config::AnalyzerConfig;
use crate::error::AnalyzerError;
use crate::extractor::EntityExtractor;
use crate::summarizer::Summarizer;
use newsdesk_domain::{normalize, AnalysisResult, LlmProvider, NormalizedArticle};
use std::sync::Arc;
use tracing::{error, info};

/// The Analyzer runs summarization and entity extraction over one article
///
/// Both backend calls are driven concurrently on the calling task and
/// joined before a result is built. Dropping the future returned by
/// [`Analyzer::analyze`] cancels both calls together.
pub struct Analyzer<L: LlmProvider> {
    summarizer: Summarizer<L>,
    extractor: EntityExtractor<L>,
    config: AnalyzerConfig,
}

impl<L: LlmProvider> Analyzer<L> {
    /// Create a new Analyzer owning the provider
    ///
    /// # Errors
    ///
    /// [`AnalyzerError::Config`] if the configuration is invalid.
    pub fn new(llm_provider: L, config: AnalyzerConfig) -> Result<Self, AnalyzerError> {
        Self::with_shared_provider(Arc::new(llm_provider), config)
    }

    /// Create a new Analyzer over a provider that is shared elsewhere
    ///
    /// # Errors
    ///
    /// [`AnalyzerError::Config`] if the configuration is invalid.
    pub fn with_shared_provider(
        llm_provider: Arc<L>,
        config: AnalyzerConfig,
    ) -> Result<Self, AnalyzerError> {
        config.validate().map_err(AnalyzerError::Config)?;

        Ok(Self {
            summarizer: Summarizer::new(Arc::clone(&llm_provider), &config),
            extractor: EntityExtractor::new(llm_provider, &config),
            config,
        })
    }

    /// The configuration this analyzer was built with
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Summarize an article and extract its entities
    ///
    /// The minimum-length check happens before any backend call.
    ///
    /// # Errors
    ///
    /// - [`AnalyzerError::InvalidInput`] if the trimmed article is shorter
    ///   than `min_article_chars`
    /// - [`AnalyzerError::AnalysisFailed`] wrapping the summarizer's error if
    ///   summarization fails; entity extraction failures never surface
    pub async fn analyze(
        &self,
        article: &NormalizedArticle,
    ) -> Result<AnalysisResult, AnalyzerError> {
        let length = article.as_str().trim().chars().count();
        if length < self.config.min_article_chars {
            return Err(AnalyzerError::InvalidInput {
                length,
                minimum: self.config.min_article_chars,
            });
        }

        info!("Starting analysis of {} char article", length);

        let (summary, entities) = tokio::join!(
            self.summarizer.summarize(article),
            self.extractor.extract_entities(article),
        );

        let summary = summary.map_err(|e| {
            error!("Summarization failed: {}", e);
            AnalyzerError::AnalysisFailed(Box::new(e))
        })?;

        info!("Analysis complete: {} entities", entities.len());

        Ok(AnalysisResult::new(summary, entities))
    }

    /// Normalize raw text, then analyze it
    ///
    /// # Errors
    ///
    /// Same as [`Analyzer::analyze`].
    pub async fn analyze_text(&self, raw: &str) -> Result<AnalysisResult, AnalyzerError> {
        self.analyze(&normalize(raw)).await
    }
}
