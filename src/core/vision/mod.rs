//! Vision API client
//!
//! Sends one normalized image plus optional keyword hints to an
//! OpenAI-compatible chat completions endpoint and maps every outcome onto a
//! [`GenerationResult`](crate::core::types::GenerationResult).

mod client;
mod error_mapper;
pub mod models;

pub use client::{AltTextGenerator, VisionClient, build_prompt};
pub use error_mapper::{classify_error_response, parse_completion};

#[cfg(test)]
pub use client::MockAltTextGenerator;
