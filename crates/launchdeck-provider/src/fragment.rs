//! Typed wire model for streamed response fragments.
//!
//! Mirrors the provider's `GenerateContentResponse` chunk shape. Every
//! field is optional or defaulted so that unexpected payloads degrade to
//! empty deltas instead of decode failures.

use serde::{Deserialize, Serialize};

/// One incremental chunk of a streamed model response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResponseFragment {
    pub candidates: Vec<Candidate>,
}

/// One response candidate. Streaming responses carry a single candidate;
/// only the first is ever consulted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Candidate {
    pub content: Option<Content>,
    pub grounding_metadata: Option<GroundingMetadata>,
    pub finish_reason: Option<String>,
}

/// The content body of a candidate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Content {
    pub parts: Vec<Part>,
    pub role: Option<String>,
}

/// One part of a content body. Only text parts matter to the chat surface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Part {
    pub text: Option<String>,
}

/// Live-search grounding metadata attached to a candidate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GroundingMetadata {
    pub grounding_chunks: Vec<GroundingChunk>,
}

/// One grounding entry; only web-backed entries carry a usable source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GroundingChunk {
    pub web: Option<WebSource>,
}

/// A web source referenced by grounding metadata. The title is frequently
/// absent; the URI can be too in malformed payloads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebSource {
    pub uri: Option<String>,
    pub title: Option<String>,
}

impl ResponseFragment {
    /// The incremental text delta carried by this fragment.
    ///
    /// Concatenates the text parts of the first candidate; empty when the
    /// fragment carries no text (for example a metadata-only chunk).
    pub fn text_delta(&self) -> String {
        let Some(candidate) = self.candidates.first() else {
            return String::new();
        };
        let Some(content) = &candidate.content else {
            return String::new();
        };
        content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect()
    }

    /// Build a text-only fragment. Test and scripting helper.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            candidates: vec![Candidate {
                content: Some(Content {
                    parts: vec![Part {
                        text: Some(text.into()),
                    }],
                    role: Some("model".to_string()),
                }),
                ..Candidate::default()
            }],
        }
    }

    /// Attach a web grounding source to the first candidate, creating the
    /// candidate if the fragment is empty. Test and scripting helper.
    pub fn with_web_source(mut self, uri: impl Into<String>, title: Option<&str>) -> Self {
        if self.candidates.is_empty() {
            self.candidates.push(Candidate::default());
        }
        let candidate = &mut self.candidates[0];
        let metadata = candidate
            .grounding_metadata
            .get_or_insert_with(GroundingMetadata::default);
        metadata.grounding_chunks.push(GroundingChunk {
            web: Some(WebSource {
                uri: Some(uri.into()),
                title: title.map(|t| t.to_string()),
            }),
        });
        self
    }
}

// =============================================================================
// Tests
// =============================================================================
