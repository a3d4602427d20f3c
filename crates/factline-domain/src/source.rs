//! Evidence sources before and after verification

use crate::Score;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A raw document returned by the web-search service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Document URL
    pub url: String,

    /// Document title, when the service has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Full document text, when the service returned contents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl SearchHit {
    /// Create an untitled hit with text contents
    pub fn new(url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: None,
            text: Some(text.into()),
        }
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// One entry of a claim's evidence set
///
/// `source_number` is the 1-based rank within this claim's result set. It is the
/// join key between retrieved sources and verifier citations and is only unique
/// within one claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    /// Document URL
    pub url: String,

    /// Document title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// 1-based rank within the evidence set
    pub source_number: u32,

    /// Truncated excerpt the verifier reasons over
    pub source_text: String,
}

/// A source's relationship to a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stance {
    /// The source supports the claim
    Support,
    /// The source contradicts the claim
    Contradict,
    /// The source is off-topic
    #[serde(alias = "not relevant", alias = "not_relevant")]
    NotRelevant,
    /// The source's position could not be determined
    Unclear,
}

impl Stance {
    /// Wire name of the stance
    pub fn as_str(&self) -> &'static str {
        match self {
            Stance::Support => "support",
            Stance::Contradict => "contradict",
            Stance::NotRelevant => "not-relevant",
            Stance::Unclear => "unclear",
        }
    }
}

impl fmt::Display for Stance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A source merged with the verifier's assessment of it
///
/// Owned exclusively by its parent claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedSource {
    /// Document URL (placeholder when the citation was dangling)
    pub url: String,

    /// Document title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// 1-based rank within the claim's evidence set
    pub source_number: u32,

    /// Truncated excerpt
    pub source_text: String,

    /// Relationship of the source to the claim
    pub stance: Stance,

    /// How strongly this source agrees with the claim
    pub agreement_percentage: Score,

    /// Topical relevance of this source, regardless of stance
    pub pertinence: Score,

    /// Verbatim quote from the source
    pub relevant_snippet: String,
}
