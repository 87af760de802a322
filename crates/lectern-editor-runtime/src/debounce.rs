//! Trailing-edge debounce.
//!
//! Only the last call of a burst reaches the callback, `delay` after that
//! call. Each call replaces the pending arguments and restarts the timer.

use std::sync::{Arc, Mutex, Weak};

use n0_future::task::{self, AbortOnDropHandle};
use n0_future::time::{self, Duration};

use crate::lock;

struct Pending<T> {
    args: Option<T>,
    /// Bumped by every call; a timer only fires for its own generation.
    generation: u64,
    /// Dropping the handle aborts the timer.
    timer: Option<AbortOnDropHandle<()>>,
}

struct Inner<T> {
    delay: Duration,
    callback: Box<dyn Fn(T) + Send + Sync>,
    pending: Mutex<Pending<T>>,
}

/// A debounced callback.
///
/// Dropping the debouncer discards any pending call.
pub struct Debouncer<T> {
    inner: Arc<Inner<T>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new<F>(delay: Duration, callback: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(Inner {
                delay,
                callback: Box::new(callback),
                pending: Mutex::new(Pending {
                    args: None,
                    generation: 0,
                    timer: None,
                }),
            }),
        }
    }

    pub fn delay(&self) -> Duration {
        self.inner.delay
    }

    /// Schedule the callback with `args`, superseding any pending call.
    ///
    /// Must be called from within an async runtime.
    pub fn call(&self, args: T) {
        let weak = Arc::downgrade(&self.inner);
        let delay = self.inner.delay;

        let mut pending = lock(&self.inner.pending);
        pending.args = Some(args);
        pending.generation += 1;
        let generation = pending.generation;
        // Replacing the handle aborts the previous timer. A timer already past
        // its sleep cannot be aborted; the generation check stops it instead.
        pending.timer = Some(AbortOnDropHandle::new(task::spawn(fire(weak, delay, generation))));
    }
}

async fn fire<T>(inner: Weak<Inner<T>>, delay: Duration, generation: u64) {
    time::sleep(delay).await;

    let Some(inner) = inner.upgrade() else {
        return;
    };
    let args = {
        let mut pending = lock(&inner.pending);
        if pending.generation != generation {
            return;
        }
        pending.args.take()
    };
    if let Some(args) = args {
        tracing::trace!(delay_ms = delay.as_millis() as u64, "debounce fired");
        (inner.callback)(args);
    }
}

impl<T> std::fmt::Debug for Debouncer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pending = lock(&self.inner.pending).args.is_some();
        f.debug_struct("Debouncer")
            .field("delay", &self.inner.delay)
            .field("pending", &pending)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Arc<Mutex<Vec<u32>>>, Debouncer<u32>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = calls.clone();
        let debouncer = Debouncer::new(Duration::from_millis(300), move |n| {
            sink.lock().unwrap().push(n);
        });
        (calls, debouncer)
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_fires_once_with_last_args() {
        let (calls, debouncer) = recorder();
        for n in 0..5 {
            debouncer.call(n);
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert!(calls.lock().unwrap().is_empty());

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(*calls.lock().unwrap(), [4]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_spaced_calls_each_fire() {
        let (calls, debouncer) = recorder();
        for n in 0..3 {
            debouncer.call(n);
            tokio::time::sleep(Duration::from_millis(350)).await;
        }
        assert_eq!(*calls.lock().unwrap(), [0, 1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_leading_edge() {
        let (calls, debouncer) = recorder();
        debouncer.call(7);
        tokio::time::sleep(Duration::from_millis(299)).await;
        assert!(calls.lock().unwrap().is_empty());
        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(*calls.lock().unwrap(), [7]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_timer_does_not_fire() {
        let (calls, debouncer) = recorder();
        debouncer.call(1);
        debouncer.call(2);

        // A timer from the first call that already woke up.
        fire(Arc::downgrade(&debouncer.inner), Duration::ZERO, 1).await;
        assert!(calls.lock().unwrap().is_empty());

        tokio::time::sleep(Duration::from_millis(299)).await;
        assert!(calls.lock().unwrap().is_empty());
        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(*calls.lock().unwrap(), [2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_discards_pending() {
        let (calls, debouncer) = recorder();
        debouncer.call(1);
        drop(debouncer);
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(calls.lock().unwrap().is_empty());
    }
}
