//! Settings payloads exposed by the service

use serde::{Deserialize, Serialize};

/// Settings as shown to clients; the key is never returned in full
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsView {
    pub api_key_configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_masked: Option<String>,
    pub auto_generate_on_upload: bool,
}

/// Partial settings update; absent fields are left alone
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsUpdate {
    #[serde(default)]
    pub openai_api_key: Option<String>,
    #[serde(default)]
    pub auto_generate_on_upload: Option<bool>,
}
