//! Error handling for the service
//!
//! `ErrorKind`/`GenerationError` describe per-image outcomes; `AltFriendError`
//! covers configuration, storage and transport plumbing.

mod helpers;
mod kind;
mod response;
mod types;

pub use kind::{ErrorKind, GenerationError};
pub use response::{ErrorDetail, ErrorResponse};
pub use types::{AltFriendError, Result};
