//! Configuration for the Extractor

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which occurrence of a repeated anchor phrase a claim resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnchorPolicy {
    /// Prefer the occurrence closest to the end of the text
    #[default]
    LastOccurrence,
    /// Prefer the occurrence closest to the start of the text
    FirstOccurrence,
}

impl AnchorPolicy {
    /// Byte offset of `needle` in `haystack` under this policy
    pub fn locate(&self, haystack: &str, needle: &str) -> Option<usize> {
        if needle.is_empty() {
            return None;
        }
        match self {
            AnchorPolicy::LastOccurrence => haystack.rfind(needle),
            AnchorPolicy::FirstOccurrence => haystack.find(needle),
        }
    }
}

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Maximum input text length (characters)
    pub max_text_length: usize,

    /// Maximum claims surfaced per submission, applied after resolution
    pub max_claims: usize,

    /// Maximum time for a single extraction call (seconds)
    pub extraction_timeout_secs: u64,

    /// Tie-break for anchors that occur more than once
    pub anchor_policy: AnchorPolicy,
}

impl ExtractorConfig {
    /// Get the extraction timeout as a Duration
    pub fn extraction_timeout(&self) -> Duration {
        Duration::from_secs(self.extraction_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_text_length == 0 {
            return Err("max_text_length must be greater than 0".to_string());
        }
        if self.max_claims == 0 {
            return Err("max_claims must be greater than 0".to_string());
        }
        if self.extraction_timeout_secs == 0 {
            return Err("extraction_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_text_length: 5_000,
            max_claims: 5,
            extraction_timeout_secs: 60,
            anchor_policy: AnchorPolicy::LastOccurrence,
        }
    }
}

impl ExtractorConfig {
    /// Thorough preset: longer inputs, more claims, more time
    pub fn thorough() -> Self {
        Self {
            max_text_length: 20_000,
            max_claims: 20,
            extraction_timeout_secs: 120,
            anchor_policy: AnchorPolicy::LastOccurrence,
        }
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
