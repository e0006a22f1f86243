//! The combined result of one article analysis

use crate::entities::EntityBundle;
use serde::{Deserialize, Serialize};

/// A summary paired with the entities found in the same article
///
/// Only ever built once both the summary and the entity extraction have
/// settled, so a caller never sees one half without the other.
///
/// Serializes as:
///
/// ```json
/// {
///   "summary": "...",
///   "geopolitical_entities": {
///     "countries": [], "nationalities": [], "people": [], "organizations": []
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Short prose summary of the article
    pub summary: String,

    /// Geopolitical entities mentioned in the article
    #[serde(rename = "geopolitical_entities")]
    pub entities: EntityBundle,
}

impl AnalysisResult {
    /// Pair a summary with its entity bundle
    pub fn new(summary: impl Into<String>, entities: EntityBundle) -> Self {
        Self {
            summary: summary.into(),
            entities,
        }
    }
}
