//! # Alt Friend
//!
//! Alt text generation for media libraries, backed by an OpenAI-compatible
//! vision API.
//!
//! ## Features
//!
//! - **Image normalization**: images are bounded to 256x256 (configurable) and
//!   re-encoded as JPEG before upload to keep token usage low
//! - **Typed failures**: every outcome carries a stable [`ErrorKind`]
//! - **Bulk runs**: sequential processing of every image lacking alt text, with
//!   progress reporting and cooperative stop
//! - **HTTP service**: single-image, bulk and settings endpoints on actix-web
//!
//! ## Bulk run in-process
//!
//! ```rust,no_run
//! use alt_friend::core::bulk::{BulkJob, BulkRunner, TracingObserver};
//! use alt_friend::{AltTextService, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/alt_friend.yaml").await?;
//!     let service = AltTextService::from_config(&config).await?;
//!
//!     let runner = BulkRunner::new(service).with_delay(config.bulk().delay());
//!     let mut job = BulkJob::new();
//!     let state = runner.run(&mut job, &TracingObserver).await?;
//!     println!("{:?}: {:?}", state, job.stats());
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod server;
pub mod services;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use core::types::{GeneratedAltText, GenerationResult, ImageRef, NormalizedImage, TokenUsage};
pub use services::AltTextService;
pub use utils::error::{AltFriendError, ErrorKind, GenerationError, Result};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Build information, reported by `/health` and logged at startup
#[derive(Debug, Clone, serde::Serialize)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
    /// Rust version
    pub rust_version: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            git_hash: option_env!("GIT_HASH").unwrap_or("unknown"),
            rust_version: option_env!("RUST_VERSION").unwrap_or("unknown"),
        }
    }
}

/// Build information of the running binary
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
