//! Abort signalling between a scheduler and the task it runs.

use tokio::sync::watch;

// == Abort Controller ==
/// Owning side of an abort signal.
#[derive(Debug)]
pub struct AbortController {
    tx: watch::Sender<bool>,
}

impl AbortController {
    /// Creates a controller and the signal it drives.
    pub fn new() -> (Self, AbortSignal) {
        let (tx, rx) = watch::channel(false);
        (Self { tx }, AbortSignal { rx })
    }

    /// Marks the signal as aborted. Idempotent.
    pub fn abort(&self) {
        self.tx.send_replace(true);
    }
}

// == Abort Signal ==
/// Cancellation flag handed to a task. Purely advisory.
#[derive(Debug, Clone)]
pub struct AbortSignal {
    rx: watch::Receiver<bool>,
}

impl AbortSignal {
    pub fn is_aborted(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once the signal is aborted. Never resolves if the
    /// controller is dropped without aborting.
    pub async fn aborted(&self) {
        let mut rx = self.rx.clone();
        let seen = rx.wait_for(|aborted| *aborted).await.is_ok();
        if !seen {
            std::future::pending::<()>().await;
        }
    }
}
