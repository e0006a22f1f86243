//! Geopolitical entity extraction

use crate::backend::call_llm;
use crate::config::{AnalyzerConfig, GenerationSettings};
use crate::error::AnalyzerError;
use crate::parser::parse_entity_response;
use crate::prompt::entity_request;
use newsdesk_domain::{EntityBundle, LlmProvider, NormalizedArticle};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Extracts countries, nationalities, people and organizations from an article
///
/// Extraction is best-effort. Transport failures, timeouts and malformed
/// responses all degrade to the empty bundle; nothing is propagated.
pub struct EntityExtractor<L: LlmProvider> {
    llm_provider: Arc<L>,
    settings: GenerationSettings,
    timeout: Duration,
}

impl<L: LlmProvider> EntityExtractor<L> {
    /// Create an extractor sharing the given provider
    pub fn new(llm_provider: Arc<L>, config: &AnalyzerConfig) -> Self {
        Self {
            llm_provider,
            settings: config.entities,
            timeout: config.request_timeout(),
        }
    }

    /// Extract the entity bundle for an article
    ///
    /// Always returns a bundle with all four categories; on any failure they
    /// are all empty.
    pub async fn extract_entities(&self, article: &NormalizedArticle) -> EntityBundle {
        match self.try_extract(article).await {
            Ok(bundle) => {
                info!(
                    "Extracted entities: {} countries, {} nationalities, {} people, {} organizations",
                    bundle.countries.len(),
                    bundle.nationalities.len(),
                    bundle.people.len(),
                    bundle.organizations.len()
                );
                bundle
            }
            Err(e) => {
                warn!("Entity extraction failed, returning empty bundle: {}", e);
                EntityBundle::default()
            }
        }
    }

    async fn try_extract(
        &self,
        article: &NormalizedArticle,
    ) -> Result<EntityBundle, AnalyzerError> {
        let request = entity_request(article, &self.settings);
        let response = call_llm(self.llm_provider.as_ref(), &request, self.timeout).await?;
        parse_entity_response(&response)
    }
}
