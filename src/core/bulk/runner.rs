//! Sequential bulk runner

use super::job::{BulkJob, BulkState};
use super::log::{BulkObserver, LogEntry};
use crate::core::types::{GenerationResult, ImageRef};
use crate::utils::error::{ErrorKind, GenerationError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Pause after each item when none is configured
pub const DEFAULT_ITEM_DELAY: Duration = Duration::from_millis(500);

/// What the runner drives: one enumeration call and one call per item.
///
/// `Err` is reserved for transport and infrastructure failures; a generation
/// failure reported by the far side is an `Ok(Err(_))`.
#[async_trait]
pub trait BulkBackend: Send + Sync {
    /// Images lacking alt text, in processing order
    async fn list_missing(&self) -> Result<Vec<ImageRef>>;

    /// Generate and persist alt text for one attachment
    async fn generate_single(&self, attachment_id: u64) -> Result<GenerationResult>;
}

#[async_trait]
impl<T: BulkBackend + ?Sized> BulkBackend for Arc<T> {
    async fn list_missing(&self) -> Result<Vec<ImageRef>> {
        (**self).list_missing().await
    }

    async fn generate_single(&self, attachment_id: u64) -> Result<GenerationResult> {
        (**self).generate_single(attachment_id).await
    }
}

/// Runs bulk jobs one item at a time
pub struct BulkRunner<B> {
    backend: B,
    delay: Duration,
}

impl<B: BulkBackend> BulkRunner<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            delay: DEFAULT_ITEM_DELAY,
        }
    }

    /// Override the pause inserted after every item
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Execute one run of `job`.
    ///
    /// The work list is fetched once and never refreshed. The stop flag is
    /// checked before each item; an in-flight item always completes. Returns
    /// the terminal state, or the enumeration error after returning the job to
    /// `Idle`.
    pub async fn run(&self, job: &mut BulkJob, observer: &dyn BulkObserver) -> Result<BulkState> {
        job.begin()?;
        observer.on_log(&LogEntry::info("Fetching images without alt text..."));

        let items = match self.backend.list_missing().await {
            Ok(items) => items,
            Err(e) => {
                observer.on_log(&LogEntry::error(format!("Error fetching images: {}", e)));
                job.abort();
                return Err(e);
            }
        };

        if items.is_empty() {
            observer.on_log(&LogEntry::success(
                "No images found without alt text. All images already have alt text!",
            ));
            job.load(items);
            let state = job.finish();
            observer.on_finished(state, job.stats());
            return Ok(state);
        }

        observer.on_log(&LogEntry::info(format!(
            "Found {} images without alt text. Starting generation...",
            items.len()
        )));
        job.load(items);
        observer.on_progress(job.progress(), job.stats());

        let stop = job.stop_handle();
        while let Some(image) = job.current().cloned() {
            if stop.is_stop_requested() {
                observer.on_log(&LogEntry::info("Processing stopped by user."));
                break;
            }

            debug!("Bulk processing attachment {}", image.id);
            let progress = job.progress();
            observer.on_item_started(&image, progress.processed + 1, progress.total);
            let outcome = self.process(&image, observer).await;
            job.record(outcome.is_ok());
            observer.on_item_finished(&image, &outcome);
            observer.on_progress(job.progress(), job.stats());

            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }

        let state = job.finish();
        if state == BulkState::Completed {
            observer.on_log(&LogEntry::success(format!(
                "Bulk processing complete! Processed {} images.",
                job.items().len()
            )));
        }
        observer.on_finished(state, job.stats());
        Ok(state)
    }

    async fn process(&self, image: &ImageRef, observer: &dyn BulkObserver) -> GenerationResult {
        let title = image.display_title();
        match self.backend.generate_single(image.id).await {
            Ok(Ok(generated)) => {
                observer.on_log(&LogEntry::success(format!(
                    "Generated alt text for \"{}\" (ID: {})",
                    title, image.id
                )));
                Ok(generated)
            }
            Ok(Err(error)) => {
                observer.on_log(&LogEntry::error(format!(
                    "Failed to generate alt text for \"{}\" (ID: {}): {}",
                    title, image.id, error.message
                )));
                Err(error)
            }
            Err(e) => {
                observer.on_log(&LogEntry::error(format!(
                    "Network error for \"{}\" (ID: {}): {}",
                    title, image.id, e
                )));
                Err(GenerationError::with_message(
                    ErrorKind::NetworkError,
                    e.to_string(),
                ))
            }
        }
    }
}
