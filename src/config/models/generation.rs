//! Bulk runner and generation behavior configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Bulk runner configuration, read by `alt-friend-bulk` unless `--delay-ms` is given
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkConfig {
    /// Pause after each item, whatever its outcome
    #[serde(default = "default_bulk_delay_ms")]
    pub delay_ms: u64,
}

impl Default for BulkConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_bulk_delay_ms(),
        }
    }
}

impl BulkConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Generation behavior
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GenerationConfig {
    /// Generate alt text as soon as an image is registered
    #[serde(default)]
    pub auto_generate_on_upload: bool,
}
