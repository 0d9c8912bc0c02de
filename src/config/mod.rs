//! Configuration management for the service
//!
//! This module handles loading, validation, and management of all service configuration.

pub mod models;

pub use models::*;

use crate::utils::error::{AltFriendError, Result};
use std::env;
use std::path::Path;
use tracing::{debug, info};

/// Default configuration file location
pub const DEFAULT_CONFIG_PATH: &str = "config/alt_friend.yaml";

/// Main configuration struct for the service
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Service configuration
    pub app: AppConfig,
}

impl Config {
    /// Load configuration from file, then apply environment overrides
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AltFriendError::Config(format!("Failed to read config file: {}", e)))?;

        let mut config = Self::from_yaml(&content)?;
        config.apply_env_overrides()?;

        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse configuration from YAML text without touching the environment
    pub fn from_yaml(content: &str) -> Result<Self> {
        let app: AppConfig = serde_yaml::from_str(content)
            .map_err(|e| AltFriendError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(Self { app })
    }

    /// Default configuration plus environment overrides
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut config = Self::default();
        config.apply_env_overrides()?;

        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|name| env::var(name).ok())
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(api_key) = lookup("OPENAI_API_KEY") {
            self.app.openai.api_key = Some(api_key);
        }
        if let Some(api_base) = lookup("OPENAI_API_BASE") {
            self.app.openai.api_base = api_base;
        }
        if let Some(host) = lookup("ALT_FRIEND_HOST") {
            self.app.server.host = host;
        }
        if let Some(port) = lookup("ALT_FRIEND_PORT") {
            self.app.server.port = port
                .parse()
                .map_err(|e| AltFriendError::Config(format!("Invalid port: {}", e)))?;
        }
        if let Some(nonce) = lookup("ALT_FRIEND_NONCE") {
            self.app.security.nonce = Some(nonce);
        }
        Ok(())
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.app.server
    }

    /// Get vision API configuration
    pub fn openai(&self) -> &OpenAIConfig {
        &self.app.openai
    }

    /// Get image normalization configuration
    pub fn image(&self) -> &ImageConfig {
        &self.app.image
    }

    /// Get security configuration
    pub fn security(&self) -> &SecurityConfig {
        &self.app.security
    }

    /// Get storage configuration
    pub fn storage(&self) -> &StorageConfig {
        &self.app.storage
    }

    /// Get bulk runner configuration
    pub fn bulk(&self) -> &BulkConfig {
        &self.app.bulk
    }

    /// Get generation behavior configuration
    pub fn generation(&self) -> &GenerationConfig {
        &self.app.generation
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.app
            .server
            .validate()
            .map_err(|e| AltFriendError::Config(format!("Server config error: {}", e)))?;

        self.app
            .openai
            .validate()
            .map_err(|e| AltFriendError::Config(format!("OpenAI config error: {}", e)))?;

        self.app
            .image
            .validate()
            .map_err(|e| AltFriendError::Config(format!("Image config error: {}", e)))?;

        self.app
            .security
            .validate()
            .map_err(|e| AltFriendError::Config(format!("Security config error: {}", e)))?;

        self.app
            .storage
            .validate()
            .map_err(|e| AltFriendError::Config(format!("Storage config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.app).map_err(|e| {
            AltFriendError::Config(format!("Failed to serialize config to YAML: {}", e))
        })
    }
}
