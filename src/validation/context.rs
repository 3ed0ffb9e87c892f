use std::future::pending;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::{Duration, Instant, sleep_until};

/// Explicit per-run state handed to the engine: operator cancellation and
/// an optional overall deadline.
#[derive(Debug, Clone)]
pub struct RunContext {
    cancel: watch::Receiver<bool>,
    // Keeps the channel open for contexts created without a handle
    _sender: Option<Arc<watch::Sender<bool>>>,
    deadline: Option<Instant>,
}

/// Triggers cancellation of the run it was created with.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    sender: Arc<watch::Sender<bool>>,
}

impl CancelHandle {
    /// Stop dispatching new probes. In-flight probes are left to finish.
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }
}

impl RunContext {
    /// Create a context, and the handle that cancels it, whose deadline is
    /// `deadline` from now.
    pub fn new(deadline: Option<Duration>) -> (Self, CancelHandle) {
        let (sender, receiver) = watch::channel(false);
        let sender = Arc::new(sender);
        let context = Self {
            cancel: receiver,
            _sender: None,
            deadline: deadline.map(|d| Instant::now() + d),
        };

        (context, CancelHandle { sender })
    }

    /// A context that can never be cancelled and has no deadline.
    pub fn unbounded() -> Self {
        let (sender, receiver) = watch::channel(false);
        Self {
            cancel: receiver,
            _sender: Some(Arc::new(sender)),
            deadline: None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        *self.cancel.borrow()
    }

    pub fn deadline_passed(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    pub fn should_stop(&self) -> bool {
        self.is_cancelled() || self.deadline_passed()
    }

    /// Resolves once the run is cancelled; never resolves otherwise.
    pub async fn cancelled(&self) {
        let mut receiver = self.cancel.clone();
        let closed = receiver.wait_for(|cancelled| *cancelled).await.is_err();
        if closed {
            // Handle dropped without cancelling
            pending::<()>().await;
        }
    }

    /// Resolves when the deadline passes; never resolves without one.
    pub async fn deadline_reached(&self) {
        match self.deadline {
            Some(deadline) => sleep_until(deadline).await,
            None => pending::<()>().await,
        }
    }

    /// Resolves on cancellation or deadline, whichever comes first.
    pub async fn stopped(&self) {
        tokio::select! {
            _ = self.cancelled() => {}
            _ = self.deadline_reached() => {}
        }
    }
}
