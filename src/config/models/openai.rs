//! Vision API configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Prefix every OpenAI secret key carries
pub const API_KEY_PREFIX: &str = "sk-";

/// OpenAI-compatible vision API configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct OpenAIConfig {
    /// Initial API key; seeds the settings store at startup
    #[serde(default)]
    pub api_key: Option<String>,
    /// API base URL, without the trailing `/chat/completions`
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Vision-capable chat model
    #[serde(default = "default_model")]
    pub model: String,
    /// Image detail level (`low` keeps token usage small)
    #[serde(default = "default_detail")]
    pub detail: String,
    /// Request timeout in seconds
    #[serde(default = "default_api_timeout")]
    pub timeout: u64,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: default_api_base(),
            model: default_model(),
            detail: default_detail(),
            timeout: default_api_timeout(),
        }
    }
}

impl std::fmt::Debug for OpenAIConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIConfig")
            .field(
                "api_key",
                &self.api_key.as_deref().map(crate::utils::mask_api_key),
            )
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("detail", &self.detail)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl OpenAIConfig {
    /// Full chat completions endpoint
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Validate vision API configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout == 0 {
            return Err("Timeout cannot be 0".to_string());
        }

        if self.model.trim().is_empty() {
            return Err("Model cannot be empty".to_string());
        }

        url::Url::parse(&self.api_base).map_err(|e| format!("Invalid api_base: {}", e))?;

        if let Some(key) = &self.api_key {
            validate_api_key_format(key)?;
        }

        Ok(())
    }
}

/// Reject keys that cannot be OpenAI secret keys.
///
/// An empty key is accepted and means "not configured".
pub fn validate_api_key_format(key: &str) -> Result<(), String> {
    if !key.is_empty() && !key.starts_with(API_KEY_PREFIX) {
        return Err(format!(
            "Invalid API key format. OpenAI API keys should start with \"{}\".",
            API_KEY_PREFIX
        ));
    }
    Ok(())
}
