//! Attachment storage configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Attachment storage backend selection
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Process-local map; contents are lost on restart
    #[default]
    Memory,
    /// JSON document rewritten after every mutation
    JsonFile,
}

/// Attachment storage configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Path of the JSON document for the `json_file` backend
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.backend == StorageBackend::JsonFile && self.path.is_none() {
            return Err("json_file storage requires a path".to_string());
        }
        Ok(())
    }
}
