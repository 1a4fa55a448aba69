//! Debounced search input
//!
//! A keystroke schedules delivery of its value after a quiet period;
//! the next keystroke cancels and reschedules. The pending task is also
//! cancelled on external reset and when the debouncer is dropped, so a
//! torn-down input can never fire late.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Quiet period before a search value is delivered
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Cancellable delayed delivery of input values
pub struct Debouncer {
    delay: Duration,
    tx: mpsc::Sender<String>,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration, tx: mpsc::Sender<String>) -> Self {
        Self {
            delay,
            tx,
            pending: None,
        }
    }

    pub fn with_default_delay(tx: mpsc::Sender<String>) -> Self {
        Self::new(DEFAULT_DEBOUNCE, tx)
    }

    /// Record a new input value, restarting the quiet period
    pub fn input(&mut self, value: impl Into<String>) {
        self.cancel();

        let tx = self.tx.clone();
        let delay = self.delay;
        let value = value.into();

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver may be gone on teardown; nothing to deliver to.
            let _ = tx.send(value).await;
        }));
    }

    /// Drop any pending delivery (external value reset)
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::error::TryRecvError;

    #[tokio::test(start_paused = true)]
    async fn test_rapid_typing_delivers_only_final_value() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut debouncer = Debouncer::with_default_delay(tx);

        for value in ["a", "ab", "abc"] {
            debouncer.input(value);
            tokio::task::yield_now().await;
            tokio::time::advance(Duration::from_millis(100)).await;
        }

        tokio::time::advance(DEFAULT_DEBOUNCE).await;
        tokio::task::yield_now().await;

        assert_eq!(rx.recv().await.as_deref(), Some("abc"));
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_typing_delivers_each_value() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut debouncer = Debouncer::with_default_delay(tx);

        for value in ["a", "ab"] {
            debouncer.input(value);
            tokio::task::yield_now().await;
            tokio::time::advance(Duration::from_millis(400)).await;
            tokio::task::yield_now().await;
        }

        assert_eq!(rx.recv().await.as_deref(), Some("a"));
        assert_eq!(rx.recv().await.as_deref(), Some("ab"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_suppresses_delivery() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut debouncer = Debouncer::with_default_delay(tx);

        debouncer.input("abc");
        tokio::task::yield_now().await;
        debouncer.cancel();

        tokio::time::advance(Duration::from_secs(1)).await;
        tokio::task::yield_now().await;

        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_delivery() {
        let (tx, mut rx) = mpsc::channel(8);

        {
            let mut debouncer = Debouncer::with_default_delay(tx);
            debouncer.input("abc");
            tokio::task::yield_now().await;
        }

        tokio::time::advance(Duration::from_secs(1)).await;
        tokio::task::yield_now().await;

        // Sender side is dropped with the debouncer, channel closes
        assert!(rx.recv().await.is_none());
    }
}
