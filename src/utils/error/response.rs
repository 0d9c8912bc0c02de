//! HTTP response handling for errors

use super::types::AltFriendError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

impl ResponseError for AltFriendError {
    fn status_code(&self) -> StatusCode {
        match self {
            AltFriendError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AltFriendError::NotFound(_) => StatusCode::NOT_FOUND,
            AltFriendError::BadRequest(_) | AltFriendError::Serialization(_) => {
                StatusCode::BAD_REQUEST
            }
            AltFriendError::AlreadyRunning => StatusCode::CONFLICT,
            AltFriendError::HttpClient(_) | AltFriendError::Remote { .. } => {
                StatusCode::BAD_GATEWAY
            }
            AltFriendError::Generation(err) => err.kind.status_code(),
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (error_code, message) = match self {
            AltFriendError::Config(_) => ("CONFIG_ERROR", self.to_string()),
            AltFriendError::NotFound(_) => ("NOT_FOUND", self.to_string()),
            AltFriendError::BadRequest(_) => ("BAD_REQUEST", self.to_string()),
            AltFriendError::Serialization(_) => ("PARSING_ERROR", self.to_string()),
            AltFriendError::AlreadyRunning => ("CONFLICT", self.to_string()),
            AltFriendError::HttpClient(_) => ("NETWORK_ERROR", self.to_string()),
            AltFriendError::Remote { .. } => ("UPSTREAM_ERROR", self.to_string()),
            AltFriendError::Storage(_) => {
                ("STORAGE_ERROR", "Storage operation failed".to_string())
            }
            AltFriendError::Generation(err) => (err.kind.as_str(), err.message.clone()),
            _ => ("INTERNAL_ERROR", "An internal error occurred".to_string()),
        };

        let critical = match self {
            AltFriendError::Generation(err) => Some(err.is_critical()),
            _ => None,
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: error_code.to_string(),
                message,
                timestamp: chrono::Utc::now().timestamp(),
                critical,
            },
        };

        HttpResponse::build(self.status_code()).json(error_response)
    }
}

/// Standard error response format
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub timestamp: i64,
    /// Set for generation kinds; true when a client should block on the error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critical: Option<bool>,
}
