//! Bulk run log lines and observers

use super::job::{BulkState, BulkStats, Progress};
use crate::core::types::{GenerationResult, ImageRef};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Info,
    Success,
    Error,
    Skip,
}

impl LogLevel {
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Info => "ℹ️",
            Self::Success => "✓",
            Self::Error => "✗",
            Self::Skip => "⊘",
        }
    }
}

/// A timestamped, human-readable log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Local>,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: Local::now(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Error, message)
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.level.icon(),
            self.timestamp.format("%H:%M:%S"),
            self.message
        )
    }
}

/// Hooks invoked by the runner as a run progresses.
///
/// Every method defaults to a no-op.
pub trait BulkObserver: Send + Sync {
    fn on_log(&self, _entry: &LogEntry) {}

    fn on_progress(&self, _progress: Progress, _stats: BulkStats) {}

    /// An item is about to be sent; `position` is 1-based
    fn on_item_started(&self, _image: &ImageRef, _position: usize, _total: usize) {}

    fn on_item_finished(&self, _image: &ImageRef, _outcome: &GenerationResult) {}

    fn on_finished(&self, _state: BulkState, _stats: BulkStats) {}
}

/// Observer forwarding log lines to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl BulkObserver for TracingObserver {
    fn on_log(&self, entry: &LogEntry) {
        match entry.level {
            LogLevel::Error => warn!("{}", entry.message),
            _ => info!("{}", entry.message),
        }
    }

    fn on_item_started(&self, image: &ImageRef, position: usize, total: usize) {
        debug!("Processing {} of {}: attachment {}", position, total, image.id);
    }

    fn on_finished(&self, state: BulkState, stats: BulkStats) {
        info!(
            "Bulk run {:?}: {} succeeded, {} failed, {} skipped",
            state, stats.success, stats.failed, stats.skipped
        );
    }
}
