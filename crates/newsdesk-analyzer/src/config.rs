//! Configuration for the Analyzer

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Output cap and sampling temperature for one kind of backend call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationSettings {
    /// Maximum tokens the backend may generate
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,
}

impl GenerationSettings {
    fn validate(&self, name: &str) -> Result<(), String> {
        if self.max_tokens == 0 {
            return Err(format!("{}.max_tokens must be greater than 0", name));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "{}.temperature {} out of range [0.0, 2.0]",
                name, self.temperature
            ));
        }
        Ok(())
    }
}

/// Configuration for the Analyzer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Minimum article length (characters, after trimming)
    pub min_article_chars: usize,

    /// Maximum time for a single backend call (seconds)
    pub request_timeout_secs: u64,

    /// Summary call: short prose, a little room for phrasing
    pub summary: GenerationSettings,

    /// Entity call: literal, reproducible extraction
    pub entities: GenerationSettings,
}

impl AnalyzerConfig {
    /// Get the per-call timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be greater than 0".to_string());
        }
        self.summary.validate("summary")?;
        self.entities.validate("entities")?;
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            min_article_chars: 50,
            request_timeout_secs: 30,
            summary: GenerationSettings {
                max_tokens: 200,
                temperature: 0.3,
            },
            entities: GenerationSettings {
                max_tokens: 500,
                temperature: 0.1,
            },
        }
    }
}
