//! HTTP route modules
//!
//! This module contains all HTTP route handlers organized by functionality.

pub mod alt_text;
pub mod attachments;
pub mod guard;
pub mod settings;

use crate::utils::error::{ErrorKind, GenerationError};
use actix_web::{HttpResponse, error::InternalError, web};
use serde::Serialize;
use tracing::debug;

/// Standard API response structure for non-generation routes
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Response data (if successful)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error message (if failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// Register every `/api` route
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(alt_text::configure_routes)
            .configure(attachments::configure_routes)
            .configure(settings::configure_routes),
    );
}

/// JSON extractor configuration: malformed bodies become `invalid_request`
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            debug!("Rejected request body: {}", err);
            let error = GenerationError::with_message(
                ErrorKind::InvalidRequest,
                format!("Invalid request: {}", err),
            );
            let response = HttpResponse::build(error.kind.status_code()).json(
                crate::server::types::GenerateResponse::failure(error, None),
            );
            InternalError::from_response(err, response).into()
        })
}
