//! Vision API client

use super::error_mapper::{classify_error_response, parse_completion};
use super::models::ChatCompletionRequest;
use crate::config::OpenAIConfig;
use crate::core::media::ImageNormalizer;
use crate::core::types::GenerationResult;
use crate::storage::SettingsStore;
use crate::utils::error::{ErrorKind, GenerationError, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::sync::Arc;
use tracing::{debug, warn};

const BASE_PROMPT: &str = "Generate a concise alt text for this image. Keep it under 200 characters and focus on the most important visual elements";

/// Anything able to describe an image.
///
/// Implementations must not touch attachment storage; callers decide where a
/// result is persisted.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AltTextGenerator: Send + Sync {
    /// Generate alt text for the image at `source`, weaving in `keywords` when relevant
    async fn generate_alt_text(&self, source: &str, keywords: &str) -> GenerationResult;
}

/// Instruction text sent alongside the image
pub fn build_prompt(keywords: &str) -> String {
    let keywords = keywords.trim();
    let mut prompt = BASE_PROMPT.to_string();
    if !keywords.is_empty() {
        prompt.push_str(
            ". Make sure to incorporate these specific keywords if they are relevant to the image: ",
        );
        prompt.push_str(keywords);
    }
    prompt.push(':');
    prompt
}

/// OpenAI-compatible vision client
pub struct VisionClient {
    http: reqwest::Client,
    config: OpenAIConfig,
    normalizer: Arc<ImageNormalizer>,
    settings: Arc<dyn SettingsStore>,
}

impl VisionClient {
    /// Create a client; the API key is read from `settings` on every call
    pub fn new(
        config: OpenAIConfig,
        normalizer: Arc<ImageNormalizer>,
        settings: Arc<dyn SettingsStore>,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout_duration())
            .build()?;

        Ok(Self {
            http,
            config,
            normalizer,
            settings,
        })
    }

    pub fn config(&self) -> &OpenAIConfig {
        &self.config
    }

    async fn send(&self, api_key: &str, request: &ChatCompletionRequest) -> GenerationResult {
        let network_error =
            |e: reqwest::Error| GenerationError::with_message(ErrorKind::NetworkError, format!("Network error: {}", e));

        let response = self
            .http
            .post(self.config.completions_url())
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        let body = response.text().await.map_err(network_error)?;

        if status != StatusCode::OK {
            let error = classify_error_response(status.as_u16(), &body);
            warn!("Vision API returned {}: {}", status, error);
            return Err(error);
        }

        parse_completion(&body)
    }
}

#[async_trait]
impl AltTextGenerator for VisionClient {
    async fn generate_alt_text(&self, source: &str, keywords: &str) -> GenerationResult {
        let api_key = self
            .settings
            .api_key()
            .await
            .ok_or_else(|| GenerationError::new(ErrorKind::MissingApiKey))?;

        let image = self.normalizer.normalize(source).await?;
        debug!(
            "Normalized {} to {}x{} {} ({} bytes, resized: {})",
            source,
            image.width,
            image.height,
            image.mime_type,
            image.bytes.len(),
            image.resized
        );

        let request = ChatCompletionRequest::vision(
            &self.config.model,
            build_prompt(keywords),
            image.to_data_uri(),
            &self.config.detail,
        );

        let generated = self.send(&api_key, &request).await?;
        if let Some(usage) = &generated.usage {
            debug!(
                "Vision API usage: prompt={} completion={} total={}",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }
        Ok(generated)
    }
}
