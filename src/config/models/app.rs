//! Root service configuration

#![allow(missing_docs)]

use super::*;
use serde::{Deserialize, Serialize};

/// Root configuration as it appears in the YAML file
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Vision API configuration
    #[serde(default)]
    pub openai: OpenAIConfig,
    /// Image normalization configuration
    #[serde(default)]
    pub image: ImageConfig,
    /// Request authorization configuration
    #[serde(default)]
    pub security: SecurityConfig,
    /// Attachment storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Bulk runner configuration
    #[serde(default)]
    pub bulk: BulkConfig,
    /// Generation behavior
    #[serde(default)]
    pub generation: GenerationConfig,
}
