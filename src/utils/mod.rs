//! Shared utilities: error types and text sanitization

pub mod error;
pub mod sanitize;

pub use error::{AltFriendError, ErrorKind, GenerationError, Result};
pub use sanitize::{mask_api_key, sanitize_text_field};
