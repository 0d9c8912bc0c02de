//! Key-value settings store

use crate::config::Config;
use crate::utils::error::Result;
use async_trait::async_trait;
use dashmap::DashMap;

/// Setting holding the vision API secret key
pub const OPENAI_API_KEY_SETTING: &str = "openai_api_key";
/// Setting toggling generation on attachment registration
pub const AUTO_GENERATE_SETTING: &str = "auto_generate_on_upload";

/// Opaque key-value settings store
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get(&self, key: &str) -> Option<String>;

    async fn set(&self, key: &str, value: String) -> Result<()>;

    /// Configured API key; blank values count as unset
    async fn api_key(&self) -> Option<String> {
        self.get(OPENAI_API_KEY_SETTING)
            .await
            .filter(|key| !key.trim().is_empty())
    }

    async fn auto_generate_on_upload(&self) -> bool {
        matches!(
            self.get(AUTO_GENERATE_SETTING).await.as_deref(),
            Some("1" | "true" | "yes" | "on")
        )
    }
}

/// Settings kept in a concurrent map
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    values: DashMap<String, String>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with the API key and generation flags from configuration
    pub fn from_config(config: &Config) -> Self {
        let store = Self::new();
        if let Some(key) = &config.openai().api_key {
            store
                .values
                .insert(OPENAI_API_KEY_SETTING.to_string(), key.clone());
        }
        store.values.insert(
            AUTO_GENERATE_SETTING.to_string(),
            config.generation().auto_generate_on_upload.to_string(),
        );
        store
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).map(|value| value.clone())
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}
