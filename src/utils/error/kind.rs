//! Alt text generation error kinds
//!
//! Every failure that reaches a caller is tagged with one of these kinds. The
//! kind travels unchanged from the vision client through the endpoints to the
//! bulk runner, so clients can branch on it without parsing messages.

use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Fixed enumeration of generation and request-validation failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    MissingApiKey,
    ImageProcessingError,
    NetworkError,
    InvalidRequest,
    InvalidApiKey,
    PermissionError,
    RateLimit,
    QuotaExceeded,
    ServerError,
    ApiError,
    InvalidResponse,
    EmptyResponse,
    MissingImageUrl,
    MissingAttachmentId,
    InvalidAttachment,
    InvalidNonce,
    InsufficientPermissions,
    /// Fallback for payloads carrying a kind this build does not know
    #[serde(other)]
    UnknownError,
}

impl ErrorKind {
    /// Wire name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingApiKey => "missing_api_key",
            Self::ImageProcessingError => "image_processing_error",
            Self::NetworkError => "network_error",
            Self::InvalidRequest => "invalid_request",
            Self::InvalidApiKey => "invalid_api_key",
            Self::PermissionError => "permission_error",
            Self::RateLimit => "rate_limit",
            Self::QuotaExceeded => "quota_exceeded",
            Self::ServerError => "server_error",
            Self::ApiError => "api_error",
            Self::InvalidResponse => "invalid_response",
            Self::EmptyResponse => "empty_response",
            Self::MissingImageUrl => "missing_image_url",
            Self::MissingAttachmentId => "missing_attachment_id",
            Self::InvalidAttachment => "invalid_attachment",
            Self::InvalidNonce => "invalid_nonce",
            Self::InsufficientPermissions => "insufficient_permissions",
            Self::UnknownError => "unknown_error",
        }
    }

    /// Stable user-facing message for the kind
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::MissingApiKey => "OpenAI API key is missing. Please add it in the settings.",
            Self::ImageProcessingError => {
                "Failed to process the image. The image format may be unsupported or corrupted."
            }
            Self::NetworkError => "Network error while contacting the vision API.",
            Self::InvalidRequest => "Invalid request: Please check your configuration.",
            Self::InvalidApiKey => "Invalid API key. Please check your OpenAI API key in settings.",
            Self::PermissionError => {
                "Permission denied. Your API key may not have access to this model."
            }
            Self::RateLimit => "Rate limit exceeded. Please try again in a few moments.",
            Self::QuotaExceeded => "Insufficient quota. Please check your OpenAI account billing.",
            Self::ServerError => "OpenAI service error. Please try again later.",
            Self::ApiError => "API request failed",
            Self::InvalidResponse => "Invalid API response: No choices returned.",
            Self::EmptyResponse => {
                "No alt text was generated. The API returned an empty response."
            }
            Self::MissingImageUrl => "Image URL is missing.",
            Self::MissingAttachmentId => "Attachment ID is missing.",
            Self::InvalidAttachment => "Invalid attachment. Only images are supported.",
            Self::InvalidNonce => {
                "Security check failed. Please refresh the page and try again."
            }
            Self::InsufficientPermissions => {
                "You do not have permission to perform this action."
            }
            Self::UnknownError => "An unknown error occurred while generating alt text.",
        }
    }

    /// Kinds a single-image client should surface with a blocking alert.
    ///
    /// Bulk runs ignore this and treat every failure as a log line.
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            Self::MissingApiKey
                | Self::InvalidApiKey
                | Self::PermissionError
                | Self::QuotaExceeded
                | Self::InvalidNonce
                | Self::InsufficientPermissions
        )
    }

    /// HTTP status used when the kind is returned by an endpoint
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingImageUrl
            | Self::MissingAttachmentId
            | Self::InvalidAttachment
            | Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::InvalidNonce | Self::InsufficientPermissions => StatusCode::FORBIDDEN,
            Self::ImageProcessingError => StatusCode::UNPROCESSABLE_ENTITY,
            Self::MissingApiKey => StatusCode::SERVICE_UNAVAILABLE,
            Self::RateLimit => StatusCode::TOO_MANY_REQUESTS,
            Self::InvalidApiKey
            | Self::PermissionError
            | Self::QuotaExceeded
            | Self::NetworkError
            | Self::ServerError
            | Self::ApiError
            | Self::InvalidResponse
            | Self::EmptyResponse => StatusCode::BAD_GATEWAY,
            Self::UnknownError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tagged generation failure: kind plus the message shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{kind}: {message}")]
pub struct GenerationError {
    pub kind: ErrorKind,
    pub message: String,
}

impl GenerationError {
    /// Failure carrying the kind's stable message
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: kind.default_message().to_string(),
        }
    }

    /// Failure with a caller-provided message
    pub fn with_message(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn is_critical(&self) -> bool {
        self.kind.is_critical()
    }
}

impl From<ErrorKind> for GenerationError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}
