//! Bulk job state

use crate::core::types::ImageRef;
use crate::utils::error::{AltFriendError, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Lifecycle of a bulk job
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkState {
    #[default]
    Idle,
    Running,
    /// Work list exhausted without a stop request
    Completed,
    /// A stop was requested at any point during the run
    Stopped,
}

impl BulkState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Stopped)
    }
}

/// Outcome counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkStats {
    pub success: usize,
    pub failed: usize,
    /// Nothing currently produces a skipped outcome
    pub skipped: usize,
}

impl BulkStats {
    pub fn processed(&self) -> usize {
        self.success + self.failed + self.skipped
    }
}

/// Progress through the work list
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    pub processed: usize,
    pub total: usize,
    /// 0-100; zero for an empty list
    pub percentage: f64,
}

/// Shared stop flag; checked by the runner between items
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn request_stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stop_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// One client-held bulk job.
///
/// The job owns its work list, cursor and counters; the runner mutates it
/// through a `&mut` borrow while stop requests arrive through a cloned
/// [`StopHandle`].
#[derive(Debug, Default)]
pub struct BulkJob {
    items: Vec<ImageRef>,
    cursor: usize,
    stats: BulkStats,
    state: BulkState,
    stop: StopHandle,
}

impl BulkJob {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn request_stop(&self) {
        self.stop.request_stop();
    }

    pub fn state(&self) -> BulkState {
        self.state
    }

    pub fn stats(&self) -> BulkStats {
        self.stats
    }

    pub fn items(&self) -> &[ImageRef] {
        &self.items
    }

    pub fn progress(&self) -> Progress {
        let total = self.items.len();
        let percentage = if total > 0 {
            self.cursor as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        Progress {
            processed: self.cursor,
            total,
            percentage,
        }
    }

    /// Enter `Running` from `Idle` or a terminal state, clearing the previous run
    pub(crate) fn begin(&mut self) -> Result<()> {
        if self.state == BulkState::Running {
            return Err(AltFriendError::AlreadyRunning);
        }
        self.items.clear();
        self.cursor = 0;
        self.stats = BulkStats::default();
        self.stop.reset();
        self.state = BulkState::Running;
        Ok(())
    }

    /// Snapshot the work list for this run
    pub(crate) fn load(&mut self, items: Vec<ImageRef>) {
        self.items = items;
        self.cursor = 0;
    }

    pub(crate) fn current(&self) -> Option<&ImageRef> {
        self.items.get(self.cursor)
    }

    pub(crate) fn record(&mut self, success: bool) {
        if success {
            self.stats.success += 1;
        } else {
            self.stats.failed += 1;
        }
        self.cursor += 1;
    }

    pub(crate) fn finish(&mut self) -> BulkState {
        self.state = if self.stop.is_stop_requested() {
            BulkState::Stopped
        } else {
            BulkState::Completed
        };
        self.state
    }

    /// Return to `Idle` after a run that never got its work list
    pub(crate) fn abort(&mut self) {
        self.state = BulkState::Idle;
    }
}
