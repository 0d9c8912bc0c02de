//! Image normalization
//!
//! Bounds an image's pixel dimensions before it is sent to the vision API so
//! that payload size and token cost stay small.

mod normalizer;
mod source;

pub use normalizer::{ImageNormalizer, NormalizeError, NormalizeOptions, normalize_bytes};
pub use source::{ImageSource, SourceResolver};
