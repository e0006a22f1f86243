//! Article summarization

use crate::backend::call_llm;
use crate::config::{AnalyzerConfig, GenerationSettings};
use crate::error::AnalyzerError;
use crate::prompt::summary_request;
use newsdesk_domain::{LlmProvider, NormalizedArticle};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Produces a short prose summary of an article
///
/// Backend failures are not recovered here: there is no safe summary to
/// substitute, so they propagate to the caller as-is.
pub struct Summarizer<L: LlmProvider> {
    llm_provider: Arc<L>,
    settings: GenerationSettings,
    timeout: Duration,
}

impl<L: LlmProvider> Summarizer<L> {
    /// Create a summarizer sharing the given provider
    pub fn new(llm_provider: Arc<L>, config: &AnalyzerConfig) -> Self {
        Self {
            llm_provider,
            settings: config.summary,
            timeout: config.request_timeout(),
        }
    }

    /// Summarize an article in 2-3 sentences
    ///
    /// Returns the trimmed model output verbatim.
    ///
    /// # Errors
    ///
    /// [`AnalyzerError::Backend`] or [`AnalyzerError::Timeout`] if the
    /// backend call fails.
    pub async fn summarize(&self, article: &NormalizedArticle) -> Result<String, AnalyzerError> {
        let request = summary_request(article, &self.settings);
        let response = call_llm(self.llm_provider.as_ref(), &request, self.timeout).await?;

        let summary = response.trim().to_string();
        info!("Generated summary: {} chars", summary.chars().count());
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::SUMMARY_SYSTEM;
    use newsdesk_domain::normalize;
    use newsdesk_llm::MockProvider;

    fn summarizer(llm: MockProvider) -> Summarizer<MockProvider> {
        Summarizer::new(Arc::new(llm), &AnalyzerConfig::default())
    }

    #[tokio::test]
    async fn test_summary_is_trimmed() {
        let summarizer = summarizer(MockProvider::new("\n  Leaders met in Paris.  \n"));
        let summary = summarizer.summarize(&normalize("article")).await.unwrap();
        assert_eq!(summary, "Leaders met in Paris.");
    }

    #[tokio::test]
    async fn test_summary_request_parameters() {
        let llm = MockProvider::new("ok");
        let summarizer = summarizer(llm.clone());
        summarizer.summarize(&normalize("article body")).await.unwrap();

        let requests = llm.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].system, SUMMARY_SYSTEM);
        assert_eq!(requests[0].max_tokens, 200);
        assert_eq!(requests[0].temperature, 0.3);
    }

    #[tokio::test]
    async fn test_backend_error_propagates() {
        let mut llm = MockProvider::default();
        llm.add_error(SUMMARY_SYSTEM);

        let result = summarizer(llm).summarize(&normalize("article")).await;
        assert!(matches!(result, Err(AnalyzerError::Backend(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_is_an_error() {
        let mut llm = MockProvider::new("too late");
        llm.add_delay(SUMMARY_SYSTEM, Duration::from_secs(120));

        let result = summarizer(llm).summarize(&normalize("article")).await;
        assert!(matches!(result, Err(AnalyzerError::Timeout(_))));
    }
}
