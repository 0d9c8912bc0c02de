//! Error types for the service

use thiserror::Error;

/// Result type alias for the service
pub type Result<T> = std::result::Result<T, AltFriendError>;

/// Infrastructure errors.
///
/// Generation outcomes use [`super::GenerationError`] instead; this enum covers
/// everything that is not a per-image failure.
#[derive(Error, Debug)]
pub enum AltFriendError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decoding or encoding errors
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request errors
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A bulk job was started while another run was active
    #[error("Bulk job already running")]
    AlreadyRunning,

    /// Errors reported by the remote service as a generation failure
    #[error("{0}")]
    Generation(#[from] super::GenerationError),

    /// Non-generation error reported by a remote Alt Friend server
    #[error("Server error {code} (HTTP {status}): {message}")]
    Remote {
        status: u16,
        code: String,
        message: String,
    },

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}
