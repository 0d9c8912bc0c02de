//! Image normalization configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Image normalization configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Maximum width after normalization
    #[serde(default = "default_max_dimension")]
    pub max_width: u32,
    /// Maximum height after normalization
    #[serde(default = "default_max_dimension")]
    pub max_height: u32,
    /// JPEG quality used when an image is resized (1-100)
    #[serde(default = "default_quality")]
    pub quality: u8,
    /// Directory for temporary downloads (system temp dir when unset)
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,
    /// Public base URL of the media library
    #[serde(default)]
    pub site_url: Option<String>,
    /// Filesystem directory that `site_url` maps onto
    #[serde(default)]
    pub media_root: Option<PathBuf>,
    /// Timeout for downloading remote images, in seconds
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout: u64,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            max_width: default_max_dimension(),
            max_height: default_max_dimension(),
            quality: default_quality(),
            temp_dir: None,
            site_url: None,
            media_root: None,
            fetch_timeout: default_fetch_timeout(),
        }
    }
}

impl ImageConfig {
    pub fn fetch_timeout_duration(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout)
    }

    /// Validate image configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_width == 0 || self.max_height == 0 {
            return Err("Max dimensions must be greater than 0".to_string());
        }

        if !(1..=100).contains(&self.quality) {
            return Err(format!("Quality must be within 1-100, got {}", self.quality));
        }

        if self.fetch_timeout == 0 {
            return Err("Fetch timeout cannot be 0".to_string());
        }

        if self.site_url.is_some() != self.media_root.is_some() {
            return Err("site_url and media_root must be set together".to_string());
        }

        Ok(())
    }
}
