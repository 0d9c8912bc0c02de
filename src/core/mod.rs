//! Core functionality for the service
//!
//! Image normalization, the vision API client and the bulk runner.

pub mod bulk;
pub mod media;
pub mod types;
pub mod vision;

pub use types::{GeneratedAltText, GenerationResult, ImageRef, NormalizedImage, TokenUsage};
