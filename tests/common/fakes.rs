//! Hand-written doubles for the public traits

use alt_friend::core::bulk::{BulkBackend, BulkObserver, BulkState, BulkStats, LogEntry, Progress};
use alt_friend::core::types::{GeneratedAltText, GenerationResult, ImageRef};
use alt_friend::core::vision::AltTextGenerator;
use alt_friend::utils::error::{AltFriendError, ErrorKind, GenerationError, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;

/// Generator returning a fixed answer and recording every call
#[derive(Default)]
pub struct FakeGenerator {
    pub reply: Option<GenerationResult>,
    pub calls: Mutex<Vec<(String, String)>>,
}

impl FakeGenerator {
    pub fn answering(text: &str) -> Self {
        Self {
            reply: Some(Ok(GeneratedAltText {
                text: text.to_string(),
                usage: None,
            })),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(kind: ErrorKind) -> Self {
        Self {
            reply: Some(Err(GenerationError::new(kind))),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl AltTextGenerator for FakeGenerator {
    async fn generate_alt_text(&self, source: &str, keywords: &str) -> GenerationResult {
        self.calls
            .lock()
            .push((source.to_string(), keywords.to_string()));
        self.reply
            .clone()
            .unwrap_or_else(|| Err(GenerationError::new(ErrorKind::UnknownError)))
    }
}

/// Bulk backend with scripted per-item outcomes
#[derive(Default)]
pub struct FakeBackend {
    pub images: Vec<ImageRef>,
    pub list_error: bool,
    /// Items not listed here succeed
    pub outcomes: HashMap<u64, std::result::Result<GenerationResult, String>>,
    pub calls: Mutex<Vec<u64>>,
}

impl FakeBackend {
    pub fn with_images(count: u64) -> Self {
        Self {
            images: (1..=count)
                .map(|id| ImageRef::new(id, format!("https://media.test/{}.png", id), format!("Image {}", id)))
                .collect(),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<u64> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl BulkBackend for FakeBackend {
    async fn list_missing(&self) -> Result<Vec<ImageRef>> {
        if self.list_error {
            return Err(AltFriendError::Internal("listing unavailable".to_string()));
        }
        Ok(self.images.clone())
    }

    async fn generate_single(&self, attachment_id: u64) -> Result<GenerationResult> {
        self.calls.lock().push(attachment_id);
        match self.outcomes.get(&attachment_id) {
            Some(Ok(outcome)) => Ok(outcome.clone()),
            Some(Err(message)) => Err(AltFriendError::Internal(message.clone())),
            None => Ok(Ok(GeneratedAltText {
                text: format!("Alt text {}", attachment_id),
                usage: None,
            })),
        }
    }
}

/// Observer keeping everything it is told
#[derive(Default)]
pub struct RecordingObserver {
    pub logs: Mutex<Vec<String>>,
    pub progress: Mutex<Vec<(Progress, BulkStats)>>,
    /// `(attachment id, position, total)` per started item
    pub started: Mutex<Vec<(u64, usize, usize)>>,
    pub finished: Mutex<Option<(BulkState, BulkStats)>>,
}

impl RecordingObserver {
    pub fn messages(&self) -> Vec<String> {
        self.logs.lock().clone()
    }
}

impl BulkObserver for RecordingObserver {
    fn on_log(&self, entry: &LogEntry) {
        self.logs.lock().push(entry.message.clone());
    }

    fn on_progress(&self, progress: Progress, stats: BulkStats) {
        self.progress.lock().push((progress, stats));
    }

    fn on_item_started(&self, image: &ImageRef, position: usize, total: usize) {
        self.started.lock().push((image.id, position, total));
    }

    fn on_finished(&self, state: BulkState, stats: BulkStats) {
        *self.finished.lock() = Some((state, stats));
    }
}
