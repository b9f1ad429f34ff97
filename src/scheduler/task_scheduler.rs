//! Task Scheduler
//!
//! Semaphore-gated execution with a per-task timeout signal.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::trace;

use crate::error::SchedulerError;
use crate::scheduler::{AbortController, AbortSignal};

// == Task Scheduler ==
/// Runs at most `concurrency` tasks at a time; extra calls wait in FIFO
/// order.
///
/// The scheduler only gates admission. Admitted tasks run on the caller's
/// own task, so nothing is spawned apart from the timeout timer. Clones
/// share the same limit.
#[derive(Debug, Clone)]
pub struct TaskScheduler {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    semaphore: Semaphore,
    concurrency: usize,
    active: AtomicUsize,
    waiting: AtomicUsize,
}

impl TaskScheduler {
    // == Constructor ==
    /// Creates a scheduler admitting `concurrency` tasks at once, clamped to
    /// `1..=Semaphore::MAX_PERMITS`.
    pub fn new(concurrency: usize) -> Self {
        let concurrency = concurrency.clamp(1, Semaphore::MAX_PERMITS);
        Self {
            inner: Arc::new(Inner {
                semaphore: Semaphore::new(concurrency),
                concurrency,
                active: AtomicUsize::new(0),
                waiting: AtomicUsize::new(0),
            }),
        }
    }

    // == Schedule Task ==
    /// Waits for a slot, then runs `task` with a signal that is aborted
    /// after `timeout`.
    ///
    /// The task's output is returned as-is; a task returning `Err` is not
    /// retried. The timeout never interrupts the task. The timer is
    /// cancelled as soon as the task settles or this future is dropped.
    ///
    /// Fails only when the scheduler was closed before the task was admitted.
    pub async fn schedule_task<F, Fut, T>(
        &self,
        timeout: Duration,
        task: F,
    ) -> Result<T, SchedulerError>
    where
        F: FnOnce(AbortSignal) -> Fut,
        Fut: Future<Output = T>,
    {
        let _permit = {
            let _waiting = CountGuard::enter(&self.inner.waiting);
            self.inner
                .semaphore
                .acquire()
                .await
                .map_err(|_| SchedulerError::Closed)?
        };
        let _active = CountGuard::enter(&self.inner.active);

        let (controller, signal) = AbortController::new();
        let _timer = TimeoutTimer::arm(controller, timeout);

        Ok(task(signal).await)
    }

    // == Close ==
    /// Rejects every waiting and future call. Running tasks finish normally.
    pub fn close(&self) {
        self.inner.semaphore.close();
    }

    pub fn is_closed(&self) -> bool {
        self.inner.semaphore.is_closed()
    }

    // == Introspection ==
    pub fn concurrency(&self) -> usize {
        self.inner.concurrency
    }

    /// Tasks currently running.
    pub fn active(&self) -> usize {
        self.inner.active.load(Ordering::SeqCst)
    }

    /// Calls waiting for a slot.
    pub fn waiting(&self) -> usize {
        self.inner.waiting.load(Ordering::SeqCst)
    }
}

// == Count Guard ==
/// Holds a counter incremented for as long as the guard lives.
struct CountGuard<'a>(&'a AtomicUsize);

impl<'a> CountGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for CountGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

// == Timeout Timer ==
/// Aborts a controller after a delay unless dropped first.
struct TimeoutTimer {
    handle: JoinHandle<()>,
}

impl TimeoutTimer {
    fn arm(controller: AbortController, timeout: Duration) -> Self {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            controller.abort();
            trace!(timeout_ms = timeout.as_millis() as u64, "Task timeout elapsed");
        });
        Self { handle }
    }
}

impl Drop for TimeoutTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
