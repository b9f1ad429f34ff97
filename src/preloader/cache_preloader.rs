//! Cache Preloader
//!
//! Walks a list of posts and runs the warmer for each, never more than
//! `max_concurrent` at once. One failing post does not stop the others.

use std::marker::PhantomData;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use futures::future::join_all;
use serde::Serialize;
use tracing::{info, warn};

use crate::preloader::Warmer;
use crate::scheduler::TaskScheduler;

/// Default number of posts warmed at once
pub const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Default time budget for a single post
pub const DEFAULT_PRELOAD_TIMEOUT: Duration = Duration::from_secs(10);

// == Options ==
/// Tuning for one [`CachePreloader::preload_posts`] call.
#[derive(Debug, Clone, Copy)]
pub struct PreloadOptions {
    /// Upper bound on concurrently running warmers (at least one)
    pub max_concurrent: usize,
    /// Budget after which a warmer's signal is aborted. Warmers that
    /// ignore the signal keep running and are judged by their own result.
    pub timeout: Duration,
}

impl Default for PreloadOptions {
    fn default() -> Self {
        Self {
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout: DEFAULT_PRELOAD_TIMEOUT,
        }
    }
}

impl PreloadOptions {
    pub fn with_max_concurrent(max_concurrent: usize) -> Self {
        Self {
            max_concurrent,
            ..Self::default()
        }
    }
}

// == Report ==
/// Summary of a preload run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PreloadReport {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Highest number of warmers observed running at once
    pub peak_in_flight: usize,
}

// == Cache Preloader ==
/// Bounded-concurrency driver around a [`Warmer`].
///
/// `queue_size` counts posts whose warmer has not started yet; it drops
/// as each one is admitted, not when it finishes. `in_flight` counts
/// warmers that started and have not finished.
#[derive(Debug)]
pub struct CachePreloader<W, P> {
    warmer: W,
    queued: AtomicUsize,
    in_flight: AtomicUsize,
    _post: PhantomData<fn(&P)>,
}

impl<W, P> CachePreloader<W, P>
where
    W: Warmer<P>,
    P: Sync,
{
    pub fn new(warmer: W) -> Self {
        Self {
            warmer,
            queued: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            _post: PhantomData,
        }
    }

    pub fn warmer(&self) -> &W {
        &self.warmer
    }

    /// Posts not yet started, across all running `preload_posts` calls.
    pub fn queue_size(&self) -> usize {
        self.queued.load(Ordering::SeqCst)
    }

    /// Posts currently being warmed.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    // == Preload Posts ==
    /// Warms every post and resolves once all of them have finished or
    /// failed. Failures are logged per post and counted in the report.
    pub async fn preload_posts(&self, posts: &[P], options: PreloadOptions) -> PreloadReport {
        let scheduler = TaskScheduler::new(options.max_concurrent);
        let running = AtomicUsize::new(0);
        let peak = AtomicUsize::new(0);

        self.queued.fetch_add(posts.len(), Ordering::SeqCst);

        let jobs: Vec<_> = posts
            .iter()
            .enumerate()
            .map(|(index, post)| {
                let scheduler = &scheduler;
                let running = &running;
                let peak = &peak;
                // Released on admission, or when the job is dropped unadmitted.
                let queued = QueuedGuard(&self.queued);

                async move {
                    let outcome = scheduler
                        .schedule_task(options.timeout, move |signal| async move {
                            drop(queued);
                            let _flight = FlightGuard::enter(&self.in_flight, running, peak);

                            let result = self.warmer.preload_post(post, signal.clone()).await;
                            if signal.is_aborted() {
                                warn!(
                                    index,
                                    timeout_ms = options.timeout.as_millis() as u64,
                                    "Preload ran past its timeout"
                                );
                            }
                            result
                        })
                        .await;

                    match outcome {
                        Ok(Ok(())) => true,
                        Ok(Err(error)) => {
                            warn!(index, error = %error, "Failed to preload post");
                            false
                        }
                        Err(error) => {
                            warn!(index, error = %error, "Preload job was not scheduled");
                            false
                        }
                    }
                }
            })
            .collect();

        let outcomes = join_all(jobs).await;
        let succeeded = outcomes.iter().filter(|ok| **ok).count();

        let report = PreloadReport {
            total: posts.len(),
            succeeded,
            failed: posts.len() - succeeded,
            peak_in_flight: peak.load(Ordering::SeqCst),
        };

        info!(
            total = report.total,
            succeeded = report.succeeded,
            failed = report.failed,
            max_concurrent = scheduler.concurrency(),
            "Preload finished"
        );
        report
    }
}

// == Queued Guard ==
/// Counts one post as queued until dropped.
struct QueuedGuard<'a>(&'a AtomicUsize);

impl Drop for QueuedGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

// == Flight Guard ==
/// Marks one warmer as running for the guard's lifetime and records the
/// peak for the current run.
struct FlightGuard<'a> {
    shared: &'a AtomicUsize,
    running: &'a AtomicUsize,
}

impl<'a> FlightGuard<'a> {
    fn enter(shared: &'a AtomicUsize, running: &'a AtomicUsize, peak: &AtomicUsize) -> Self {
        shared.fetch_add(1, Ordering::SeqCst);
        let now = running.fetch_add(1, Ordering::SeqCst) + 1;
        peak.fetch_max(now, Ordering::SeqCst);
        Self { shared, running }
    }
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.shared.fetch_sub(1, Ordering::SeqCst);
        self.running.fetch_sub(1, Ordering::SeqCst);
    }
}
