//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::services::AltTextService;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// All fields are wrapped in Arc for sharing across worker threads.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration (shared read-only)
    pub config: Arc<Config>,
    /// Alt text service
    pub service: Arc<AltTextService>,
}

impl AppState {
    pub fn new(config: Config, service: AltTextService) -> Self {
        Self {
            config: Arc::new(config),
            service: Arc::new(service),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
