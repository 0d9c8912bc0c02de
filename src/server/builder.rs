//! Server builder and run_server function
//!
//! This module provides the ServerBuilder for easier server configuration
//! and the run_server function for automatic configuration loading.

use crate::config::{Config, DEFAULT_CONFIG_PATH};
use crate::server::server::HttpServer;
use crate::utils::error::{AltFriendError, Result};
use std::path::Path;
use tracing::{info, warn};

/// Server builder for easier configuration
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub async fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| AltFriendError::Config("Configuration is required".to_string()))?;

        HttpServer::new(&config).await
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Load configuration, falling back to defaults plus environment overrides
/// when the file is missing
pub async fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));
    info!("Loading configuration file: {}", path.display());

    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        warn!(
            "Configuration file {} not found, using defaults and environment",
            path.display()
        );
        return Config::from_env();
    }

    Config::from_file(path).await
}

/// Run the server with automatic configuration loading
pub async fn run_server(config_path: Option<&Path>) -> Result<()> {
    let build = crate::build_info();
    info!(
        "Starting Alt Friend v{} ({}, {})",
        build.version, build.git_hash, build.rust_version
    );

    let config = load_config(config_path).await?;
    if config.openai().api_key.is_none() {
        warn!("No OpenAI API key configured; generation will fail until one is set");
    }

    let server = ServerBuilder::new().with_config(config.clone()).build().await?;
    info!(
        "Server starting at: http://{}:{}",
        config.server().host,
        config.server().port
    );
    info!("API Endpoints:");
    info!("   GET  /health - Health check");
    info!("   POST /api/alt-text/generate - Generate alt text for one image");
    info!("   POST /api/alt-text/bulk/generate - Generate alt text for a stored attachment");
    info!("   GET  /api/alt-text/missing - Images without alt text");
    info!("   POST /api/attachments - Register an attachment");
    info!("   GET  /api/settings - Current settings");

    server.start().await
}
