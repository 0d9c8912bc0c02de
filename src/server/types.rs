//! Request and response bodies of the alt text API

use crate::core::types::{GeneratedAltText, GenerationResult, ImageRef, TokenUsage};
use crate::storage::Attachment;
use crate::utils::error::{ErrorKind, GenerationError};
use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};

/// Single-generate request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub attachment_id: Option<u64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub keywords: Option<String>,
}

/// Bulk-single-generate request; everything else is resolved server-side
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulkGenerateRequest {
    #[serde(default)]
    pub attachment_id: Option<u64>,
}

/// Keyword update request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeywordsRequest {
    #[serde(default)]
    pub keywords: String,
}

/// Outcome of a generation call as seen on the wire
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critical: Option<bool>,
}

impl GenerateResponse {
    pub fn success(generated: GeneratedAltText, attachment_id: Option<u64>) -> Self {
        Self {
            success: true,
            alt_text: Some(generated.text),
            attachment_id,
            usage: generated.usage,
            ..Self::default()
        }
    }

    pub fn failure(error: GenerationError, attachment_id: Option<u64>) -> Self {
        Self {
            success: false,
            attachment_id,
            critical: Some(error.is_critical()),
            error_kind: Some(error.kind),
            message: Some(error.message),
            ..Self::default()
        }
    }

    pub fn from_outcome(outcome: GenerationResult, attachment_id: Option<u64>) -> Self {
        match outcome {
            Ok(generated) => Self::success(generated, attachment_id),
            Err(error) => Self::failure(error, attachment_id),
        }
    }

    /// Back to a tagged outcome; bodies without a kind count as unknown errors
    pub fn into_outcome(self) -> GenerationResult {
        if self.success {
            Ok(GeneratedAltText {
                text: self.alt_text.unwrap_or_default(),
                usage: self.usage,
            })
        } else {
            Err(GenerationError::with_message(
                self.error_kind.unwrap_or(ErrorKind::UnknownError),
                self.message.unwrap_or_else(|| "Unknown error".to_string()),
            ))
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match (self.success, self.error_kind) {
            (true, _) => StatusCode::OK,
            (false, Some(kind)) => kind.status_code(),
            (false, None) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Enumeration entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingImage {
    pub id: u64,
    pub url: String,
    #[serde(default)]
    pub title: String,
}

impl From<ImageRef> for MissingImage {
    fn from(image: ImageRef) -> Self {
        Self {
            id: image.id,
            url: image.url,
            title: image.title,
        }
    }
}

impl From<MissingImage> for ImageRef {
    fn from(image: MissingImage) -> Self {
        ImageRef::new(image.id, image.url, image.title)
    }
}

/// Enumeration response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MissingImagesResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub images: Vec<MissingImage>,
    #[serde(default)]
    pub total: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

impl MissingImagesResponse {
    pub fn new(images: Vec<ImageRef>) -> Self {
        let images: Vec<MissingImage> = images.into_iter().map(MissingImage::from).collect();
        Self {
            success: true,
            total: images.len(),
            images,
            ..Self::default()
        }
    }

    pub fn failure(error: GenerationError) -> Self {
        Self {
            success: false,
            message: Some(error.message),
            error_kind: Some(error.kind),
            ..Self::default()
        }
    }
}

/// Attachment as returned by the attachment endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentView {
    #[serde(flatten)]
    pub attachment: Attachment,
    /// Lets a client label its action "Generate" or "Re-generate"
    pub has_alt_text: bool,
}

impl From<Attachment> for AttachmentView {
    fn from(attachment: Attachment) -> Self {
        Self {
            has_alt_text: attachment.has_alt_text(),
            attachment,
        }
    }
}
