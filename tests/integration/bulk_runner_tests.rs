//! Bulk runner flow tests

#[cfg(test)]
mod tests {
    use crate::common::{FakeBackend, RecordingObserver};
    use alt_friend::config::default_bulk_delay_ms;
    use alt_friend::core::bulk::{
        BulkJob, BulkObserver, BulkRunner, BulkState, BulkStats, DEFAULT_ITEM_DELAY, LogEntry,
        Progress, StopHandle,
    };
    use alt_friend::core::types::ImageRef;
    use alt_friend::utils::error::{ErrorKind, GenerationError};
    use parking_lot::Mutex;
    use std::sync::Arc;
    use std::time::Duration;

    fn runner(backend: FakeBackend) -> BulkRunner<FakeBackend> {
        BulkRunner::new(backend).with_delay(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_mixed_outcomes() {
        let mut backend = FakeBackend::with_images(3);
        backend.outcomes.insert(
            2,
            Ok(Err(GenerationError::new(ErrorKind::RateLimit))),
        );
        let runner = runner(backend);
        let observer = RecordingObserver::default();
        let mut job = BulkJob::new();

        let state = runner.run(&mut job, &observer).await.unwrap();

        assert_eq!(state, BulkState::Completed);
        assert_eq!(
            job.stats(),
            BulkStats {
                success: 2,
                failed: 1,
                skipped: 0
            }
        );
        assert_eq!(runner.backend().calls(), vec![1, 2, 3]);

        let messages = observer.messages();
        assert_eq!(messages[0], "Fetching images without alt text...");
        assert_eq!(
            messages[1],
            "Found 3 images without alt text. Starting generation..."
        );
        assert!(messages.contains(&"Generated alt text for \"Image 1\" (ID: 1)".to_string()));
        assert!(messages.iter().any(|m| m.starts_with("Failed to generate alt text for \"Image 2\" (ID: 2): Rate limit exceeded")));
        assert_eq!(
            messages.last().unwrap(),
            "Bulk processing complete! Processed 3 images."
        );

        let progress = observer.progress.lock();
        let last = progress.last().unwrap().0;
        assert_eq!((last.processed, last.total), (3, 3));
        assert!((last.percentage - 100.0).abs() < f64::EPSILON);
        assert_eq!(
            *observer.finished.lock(),
            Some((BulkState::Completed, job.stats()))
        );
    }

    #[tokio::test]
    async fn test_transport_failure_counts_as_failed() {
        let mut backend = FakeBackend::with_images(2);
        backend
            .outcomes
            .insert(1, Err("connection reset".to_string()));
        let runner = runner(backend);
        let observer = RecordingObserver::default();
        let mut job = BulkJob::new();

        let state = runner.run(&mut job, &observer).await.unwrap();

        assert_eq!(state, BulkState::Completed);
        assert_eq!(job.stats().failed, 1);
        assert_eq!(job.stats().success, 1);
        assert!(
            observer
                .messages()
                .iter()
                .any(|m| m.starts_with("Network error for \"Image 1\" (ID: 1):"))
        );
    }

    /// Requests a stop as soon as the first item finishes
    struct StopAfterFirst {
        stop: StopHandle,
        inner: RecordingObserver,
        seen: Mutex<usize>,
    }

    impl BulkObserver for StopAfterFirst {
        fn on_log(&self, entry: &LogEntry) {
            self.inner.on_log(entry);
        }

        fn on_progress(&self, progress: Progress, stats: BulkStats) {
            if stats.processed() > 0 {
                let mut seen = self.seen.lock();
                *seen += 1;
                if *seen == 1 {
                    self.stop.request_stop();
                }
            }
            self.inner.on_progress(progress, stats);
        }
    }

    #[tokio::test]
    async fn test_stop_between_items() {
        let runner = runner(FakeBackend::with_images(3));
        let mut job = BulkJob::new();
        let observer = StopAfterFirst {
            stop: job.stop_handle(),
            inner: RecordingObserver::default(),
            seen: Mutex::new(0),
        };

        let state = runner.run(&mut job, &observer).await.unwrap();

        assert_eq!(state, BulkState::Stopped);
        assert_eq!(runner.backend().calls(), vec![1]);
        assert_eq!(job.stats().success, 1);
        assert_eq!(job.progress().processed, 1);
        let messages = observer.inner.messages();
        assert_eq!(messages.last().unwrap(), "Processing stopped by user.");
        assert!(!messages.iter().any(|m| m.starts_with("Bulk processing complete!")));
    }

    #[tokio::test]
    async fn test_empty_work_list() {
        let runner = runner(FakeBackend::default());
        let observer = RecordingObserver::default();
        let mut job = BulkJob::new();

        let state = runner.run(&mut job, &observer).await.unwrap();

        assert_eq!(state, BulkState::Completed);
        assert_eq!(job.stats(), BulkStats::default());
        assert!(runner.backend().calls().is_empty());
        assert_eq!(
            observer.messages().last().unwrap(),
            "No images found without alt text. All images already have alt text!"
        );
        let progress = job.progress();
        assert_eq!(progress.total, 0);
        assert_eq!(progress.percentage, 0.0);
    }

    #[tokio::test]
    async fn test_enumeration_failure_returns_to_idle() {
        let backend = FakeBackend {
            list_error: true,
            ..FakeBackend::default()
        };
        let runner = runner(backend);
        let observer = RecordingObserver::default();
        let mut job = BulkJob::new();

        let result = runner.run(&mut job, &observer).await;

        assert!(result.is_err());
        assert_eq!(job.state(), BulkState::Idle);
        assert!(
            observer
                .messages()
                .iter()
                .any(|m| m.starts_with("Error fetching images:"))
        );
        assert!(observer.finished.lock().is_none());
    }

    #[tokio::test]
    async fn test_job_can_run_again() {
        let runner = runner(FakeBackend::with_images(2));
        let observer = RecordingObserver::default();
        let mut job = BulkJob::new();

        job.request_stop();
        // A fresh run clears a stale stop request
        assert_eq!(
            runner.run(&mut job, &observer).await.unwrap(),
            BulkState::Completed
        );
        assert_eq!(
            runner.run(&mut job, &observer).await.unwrap(),
            BulkState::Completed
        );
        assert_eq!(job.stats().success, 2);
        assert_eq!(runner.backend().calls(), vec![1, 2, 1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_default_pause_follows_every_item() {
        assert_eq!(DEFAULT_ITEM_DELAY, Duration::from_millis(500));
        assert_eq!(
            Duration::from_millis(default_bulk_delay_ms()),
            DEFAULT_ITEM_DELAY
        );

        let mut backend = FakeBackend::with_images(3);
        backend
            .outcomes
            .insert(2, Ok(Err(GenerationError::new(ErrorKind::ApiError))));
        let runner = BulkRunner::new(backend);
        let observer = RecordingObserver::default();
        let mut job = BulkJob::new();

        let started = tokio::time::Instant::now();
        let state = runner.run(&mut job, &observer).await.unwrap();

        assert_eq!(state, BulkState::Completed);
        assert_eq!(job.stats().failed, 1);
        assert!(started.elapsed() >= DEFAULT_ITEM_DELAY * 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_configured_pause() {
        let runner =
            BulkRunner::new(FakeBackend::with_images(2)).with_delay(Duration::from_millis(1200));
        let mut job = BulkJob::new();

        let started = tokio::time::Instant::now();
        runner
            .run(&mut job, &RecordingObserver::default())
            .await
            .unwrap();

        assert!(started.elapsed() >= Duration::from_millis(2400));
    }

    /// Records how many backend calls had been made when each item started
    struct CallsAtStart {
        backend: Arc<FakeBackend>,
        inner: RecordingObserver,
        calls_seen: Mutex<Vec<usize>>,
    }

    impl BulkObserver for CallsAtStart {
        fn on_item_started(&self, image: &ImageRef, position: usize, total: usize) {
            self.calls_seen.lock().push(self.backend.calls().len());
            self.inner.on_item_started(image, position, total);
        }
    }

    #[tokio::test]
    async fn test_item_reported_before_request() {
        let backend = Arc::new(FakeBackend::with_images(3));
        let runner = BulkRunner::new(backend.clone()).with_delay(Duration::ZERO);
        let observer = CallsAtStart {
            backend,
            inner: RecordingObserver::default(),
            calls_seen: Mutex::new(Vec::new()),
        };
        let mut job = BulkJob::new();

        runner.run(&mut job, &observer).await.unwrap();

        assert_eq!(*observer.calls_seen.lock(), vec![0, 1, 2]);
        assert_eq!(
            *observer.inner.started.lock(),
            vec![(1, 1, 3), (2, 2, 3), (3, 3, 3)]
        );
    }
}
