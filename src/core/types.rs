//! Shared domain types

use crate::utils::error::GenerationError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

/// An image to describe: attachment id, resolvable location and keyword hints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub id: u64,
    pub url: String,
    #[serde(default)]
    pub title: String,
    /// Comma-separated keyword hints; may be empty
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub keywords: String,
}

impl ImageRef {
    pub fn new(id: u64, url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id,
            url: url.into(),
            title: title.into(),
            keywords: String::new(),
        }
    }

    /// Title for log lines; untitled images get a placeholder
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            "Untitled"
        } else {
            &self.title
        }
    }
}

/// An image bounded to the configured dimensions, ready for transmission
#[derive(Clone, PartialEq, Eq)]
pub struct NormalizedImage {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
    pub width: u32,
    pub height: u32,
    /// False when the source was already within bounds and passed through untouched
    pub resized: bool,
}

impl NormalizedImage {
    /// Self-contained `data:` URI embedding the encoded bytes
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.bytes))
    }
}

impl std::fmt::Debug for NormalizedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NormalizedImage")
            .field("bytes", &self.bytes.len())
            .field("mime_type", &self.mime_type)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("resized", &self.resized)
            .finish()
    }
}

/// Token accounting reported by the vision API
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

/// Successful generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedAltText {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
}

/// Outcome of one generation attempt
pub type GenerationResult = std::result::Result<GeneratedAltText, GenerationError>;
