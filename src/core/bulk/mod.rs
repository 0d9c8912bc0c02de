//! Bulk runner
//!
//! Drives single-item generation sequentially over a snapshot of the images
//! lacking alt text, with progress reporting and cooperative stop.

mod http;
mod job;
mod log;
mod runner;

pub use http::HttpBulkBackend;
pub use job::{BulkJob, BulkState, BulkStats, Progress, StopHandle};
pub use log::{BulkObserver, LogEntry, LogLevel, TracingObserver};
pub use runner::{BulkBackend, BulkRunner, DEFAULT_ITEM_DELAY};
