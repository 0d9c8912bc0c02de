//! Configuration data models
//!
//! This module defines all configuration structures used throughout the service.

#![allow(missing_docs)]

pub mod app;
pub mod generation;
pub mod image;
pub mod openai;
pub mod security;
pub mod server;
pub mod storage;

// Re-export all configuration types
pub use app::*;
pub use generation::*;
pub use image::*;
pub use openai::*;
pub use security::*;
pub use server::*;
pub use storage::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8080
}

/// Default maximum body size in bytes
pub fn default_max_body_size() -> usize {
    2 * 1024 * 1024 // 2MB
}

/// Default OpenAI API base
pub fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

/// Default vision-capable chat model
pub fn default_model() -> String {
    "gpt-4.1-mini".to_string()
}

/// Default image detail level sent with the request
pub fn default_detail() -> String {
    "low".to_string()
}

/// Default vision API timeout in seconds (model latency can be high)
pub fn default_api_timeout() -> u64 {
    60
}

/// Default image fetch timeout in seconds
pub fn default_fetch_timeout() -> u64 {
    30
}

pub fn default_max_dimension() -> u32 {
    256
}

pub fn default_quality() -> u8 {
    50
}

/// Default pause between bulk items in milliseconds
pub fn default_bulk_delay_ms() -> u64 {
    500
}

pub fn default_capabilities() -> Vec<String> {
    vec![UPLOAD_FILES_CAPABILITY.to_string()]
}
