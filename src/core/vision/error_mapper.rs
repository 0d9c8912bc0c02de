//! Classification of vision API responses

use super::models::ChatCompletionResponse;
use crate::core::types::{GeneratedAltText, GenerationResult};
use crate::utils::error::{ErrorKind, GenerationError};
use serde_json::Value;

/// Map a non-200 response onto a tagged failure.
///
/// A structured `error` object wins; its `type` selects the kind. Without one
/// the HTTP status decides.
pub fn classify_error_response(status: u16, body: &str) -> GenerationError {
    let payload = serde_json::from_str::<Value>(body).ok();
    match payload.as_ref().and_then(|p| p.get("error")).filter(|e| !e.is_null()) {
        Some(error) => classify_error_object(error),
        None => classify_status(status),
    }
}

fn classify_error_object(error: &Value) -> GenerationError {
    let message = error.get("message").and_then(Value::as_str);
    let Some(error_type) = error.get("type").and_then(Value::as_str) else {
        return GenerationError::with_message(
            ErrorKind::ApiError,
            message.unwrap_or(ErrorKind::ApiError.default_message()),
        );
    };

    match error_type {
        "invalid_request_error" => GenerationError::with_message(
            ErrorKind::InvalidRequest,
            format!(
                "Invalid request: {}",
                message.unwrap_or("Please check your configuration.")
            ),
        ),
        "authentication_error" => GenerationError::new(ErrorKind::InvalidApiKey),
        "permission_error" => GenerationError::new(ErrorKind::PermissionError),
        "rate_limit_error" => GenerationError::new(ErrorKind::RateLimit),
        "insufficient_quota" => GenerationError::new(ErrorKind::QuotaExceeded),
        _ => GenerationError::with_message(
            ErrorKind::ApiError,
            message.unwrap_or("Unknown API error occurred."),
        ),
    }
}

fn classify_status(status: u16) -> GenerationError {
    match status {
        401 => GenerationError::with_message(
            ErrorKind::InvalidApiKey,
            "Authentication failed. Please check your API key.",
        ),
        429 => GenerationError::with_message(
            ErrorKind::RateLimit,
            "Rate limit exceeded. Please try again later.",
        ),
        s if s >= 500 => GenerationError::new(ErrorKind::ServerError),
        _ => GenerationError::new(ErrorKind::ApiError),
    }
}

/// Extract the completion text from a 200 response
pub fn parse_completion(body: &str) -> GenerationResult {
    let response: ChatCompletionResponse = serde_json::from_str(body)
        .map_err(|_| GenerationError::new(ErrorKind::InvalidResponse))?;

    let choice = match response.choices.as_deref() {
        Some([first, ..]) => first,
        _ => return Err(GenerationError::new(ErrorKind::InvalidResponse)),
    };

    let text = choice
        .message
        .as_ref()
        .and_then(|m| m.content.clone())
        .unwrap_or_default();
    if text.is_empty() {
        return Err(GenerationError::new(ErrorKind::EmptyResponse));
    }

    Ok(GeneratedAltText {
        text,
        usage: response.usage,
    })
}
