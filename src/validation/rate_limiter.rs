use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant, sleep_until};

/// Gate in front of every probe dispatch.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Suspend until the next dispatch is permitted.
    async fn acquire(&self);
}

/// Fixed-delay throttle shared by all workers of a run.
///
/// Guarantees at least `interval` between the starts of two successive
/// dispatches, regardless of how many workers call [`RateLimiter::acquire`].
/// The lock is held across the wait, so waiters are served one at a time.
/// Dropping a pending `acquire` future releases the lock without recording
/// a dispatch.
#[derive(Debug)]
pub struct FixedDelayLimiter {
    interval: Duration,
    last_dispatch: Mutex<Option<Instant>>,
}

impl FixedDelayLimiter {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_dispatch: Mutex::new(None),
        }
    }
}

#[async_trait]
impl RateLimiter for FixedDelayLimiter {
    async fn acquire(&self) {
        let mut last_dispatch = self.last_dispatch.lock().await;
        if let Some(previous) = *last_dispatch
            && !self.interval.is_zero()
        {
            sleep_until(previous + self.interval).await;
        }
        *last_dispatch = Some(Instant::now());
    }
}
