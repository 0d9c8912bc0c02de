//! HTTP bulk backend

use super::runner::BulkBackend;
use crate::core::types::{GenerationResult, ImageRef};
use crate::server::routes::guard::NONCE_HEADER;
use crate::server::types::{BulkGenerateRequest, GenerateResponse, MissingImagesResponse};
use crate::utils::error::{AltFriendError, ErrorKind, ErrorResponse, GenerationError, Result};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Drives a running server's enumeration and bulk-single endpoints
#[derive(Debug, Clone)]
pub struct HttpBulkBackend {
    http: reqwest::Client,
    base_url: Url,
    nonce: Option<String>,
    token: Option<String>,
}

/// Body of a reply, before the error envelope has been ruled out
enum Reply<T> {
    Body(T),
    Failed(AltFriendError),
}

impl HttpBulkBackend {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base_url = Url::parse(base_url).map_err(|e| {
            AltFriendError::Config(format!("Invalid server URL {}: {}", base_url, e))
        })?;
        // Endpoint paths are joined relative to the base
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        // Generous enough for the server's own vision API timeout
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;

        Ok(Self {
            http,
            base_url,
            nonce: None,
            token: None,
        })
    }

    pub fn with_nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| AltFriendError::Config(format!("Invalid endpoint {}: {}", path, e)))?;

        let mut request = self.http.request(method, url);
        if let Some(nonce) = &self.nonce {
            request = request.header(NONCE_HEADER, nonce);
        }
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        Ok(request)
    }

    /// Read a reply as `T`, unless it is the `{"error": {...}}` envelope
    async fn read<T: DeserializeOwned>(request: RequestBuilder) -> Result<Reply<T>> {
        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if let Ok(envelope) = serde_json::from_slice::<ErrorResponse>(&bytes) {
            return Ok(Reply::Failed(remote_error(status, envelope)));
        }

        match serde_json::from_slice::<T>(&bytes) {
            Ok(body) => Ok(Reply::Body(body)),
            Err(_) if !status.is_success() => Ok(Reply::Failed(AltFriendError::Remote {
                status: status.as_u16(),
                code: "unexpected_response".to_string(),
                message: String::from_utf8_lossy(&bytes).trim().to_string(),
            })),
            Err(e) => Err(e.into()),
        }
    }
}

/// Generation kinds come back as generation errors; anything else keeps the
/// server's code and message
fn remote_error(status: StatusCode, envelope: ErrorResponse) -> AltFriendError {
    let detail = envelope.error;
    let kind = serde_json::from_value::<ErrorKind>(serde_json::Value::String(detail.code.clone()))
        .unwrap_or(ErrorKind::UnknownError);

    if kind == ErrorKind::UnknownError {
        AltFriendError::Remote {
            status: status.as_u16(),
            code: detail.code,
            message: detail.message,
        }
    } else {
        AltFriendError::Generation(GenerationError::with_message(kind, detail.message))
    }
}

#[async_trait]
impl BulkBackend for HttpBulkBackend {
    async fn list_missing(&self) -> Result<Vec<ImageRef>> {
        let request = self.request(Method::GET, "api/alt-text/missing")?;
        let body: MissingImagesResponse = match Self::read(request).await? {
            Reply::Body(body) => body,
            Reply::Failed(e) => return Err(e),
        };

        if !body.success {
            return Err(AltFriendError::Generation(GenerationError::with_message(
                body.error_kind.unwrap_or(ErrorKind::UnknownError),
                body.message.unwrap_or_else(|| "Unknown error".to_string()),
            )));
        }

        debug!("Server reported {} images without alt text", body.total);
        Ok(body.images.into_iter().map(ImageRef::from).collect())
    }

    async fn generate_single(&self, attachment_id: u64) -> Result<GenerationResult> {
        let request = self
            .request(Method::POST, "api/alt-text/bulk/generate")?
            .json(&BulkGenerateRequest {
                attachment_id: Some(attachment_id),
            });

        match Self::read::<GenerateResponse>(request).await? {
            Reply::Body(body) => Ok(body.into_outcome()),
            // A rejected nonce or capability is a per-item failure reported by the server
            Reply::Failed(AltFriendError::Generation(error)) => Ok(Err(error)),
            Reply::Failed(e) => Err(e),
        }
    }
}
