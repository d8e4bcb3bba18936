//! Deferred tasks
//!
//! Implements:
//! - Debouncer for free-text search input (500 ms quiet window by default)

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::debug;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

// ═══════════════════════════════════════════════════════════════════════════
// Debouncer
// ═══════════════════════════════════════════════════════════════════════════

/// Emits the last pushed value once input has been quiet for `window`.
///
/// Every push cancels the emission still pending from the previous one, so
/// a burst of keystrokes produces a single value on the receiver.
pub struct Debouncer<T> {
    window: Duration,
    tx: mpsc::UnboundedSender<T>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(window: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let debouncer = Self {
            window,
            tx,
            pending: None,
        };
        (debouncer, rx)
    }

    /// Restarts the quiet window with `value` as the candidate.
    pub fn push(&mut self, value: T) {
        self.cancel();

        let tx = self.tx.clone();
        let window = self.window;
        self.pending = Some(tokio::spawn(async move {
            sleep(window).await;
            // The receiver may be gone if the view was torn down.
            let _ = tx.send(value);
        }));
    }

    /// Drops the pending emission, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            if !handle.is_finished() {
                debug!("Debounced value superseded");
            }
            handle.abort();
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn only_the_last_value_fires() {
        let (mut debouncer, mut rx) = Debouncer::new(DEFAULT_DEBOUNCE);

        debouncer.push("s".to_string());
        sleep(Duration::from_millis(200)).await;
        debouncer.push("sa".to_string());
        sleep(Duration::from_millis(200)).await;
        debouncer.push("saeb".to_string());

        sleep(Duration::from_millis(499)).await;
        assert!(rx.try_recv().is_err());

        sleep(Duration::from_millis(2)).await;
        assert_eq!(rx.recv().await.as_deref(), Some("saeb"));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn spaced_values_each_fire() {
        let (mut debouncer, mut rx) = Debouncer::new(Duration::from_millis(100));

        debouncer.push(1);
        sleep(Duration::from_millis(150)).await;
        debouncer.push(2);
        sleep(Duration::from_millis(150)).await;

        assert_eq!(rx.recv().await, Some(1));
        assert_eq!(rx.recv().await, Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_drops_pending_value() {
        let (mut debouncer, mut rx) = Debouncer::new(Duration::from_millis(100));

        debouncer.push(7);
        debouncer.cancel();
        sleep(Duration::from_millis(500)).await;

        assert!(rx.try_recv().is_err());
    }
}
