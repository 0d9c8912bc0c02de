//! Request authorization
//!
//! Two checks, in order: the shared request nonce, then the capability
//! granted to the caller's bearer token.

use crate::config::SecurityConfig;
use crate::utils::error::{ErrorKind, GenerationError};
use actix_web::HttpRequest;
use actix_web::http::header::AUTHORIZATION;
use tracing::warn;

/// Header carrying the shared request nonce
pub const NONCE_HEADER: &str = "x-alt-friend-nonce";

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
}

/// Check the nonce and the capability required by a route
pub fn authorize(
    req: &HttpRequest,
    security: &SecurityConfig,
    capability: &str,
) -> Result<(), GenerationError> {
    if let Some(expected) = &security.nonce {
        let provided = req
            .headers()
            .get(NONCE_HEADER)
            .and_then(|value| value.to_str().ok());
        if provided != Some(expected.as_str()) {
            warn!("Rejected request to {}: bad nonce", req.path());
            return Err(GenerationError::new(ErrorKind::InvalidNonce));
        }
    }

    if !security.checks_capabilities() {
        return Ok(());
    }

    let granted = bearer_token(req)
        .and_then(|token| security.capabilities_for(token))
        .is_some_and(|caps| caps.iter().any(|c| c == capability));
    if !granted {
        warn!("Rejected request to {}: missing {}", req.path(), capability);
        return Err(GenerationError::new(ErrorKind::InsufficientPermissions));
    }

    Ok(())
}
