//! Cancellation signal for in-flight searches.
//!
//! A [`CancelToken`] is a cloneable flag backed by a `watch` channel. Every
//! clone observes the same state; once cancelled it stays cancelled.

use std::sync::Arc;
use tokio::sync::watch;

/// Shared, one-way cancellation flag.
///
/// # Example
///
/// ```ignore
/// let token = CancelToken::new();
/// let child = token.clone();
///
/// tokio::spawn(async move {
///     tokio::select! {
///         biased;
///         _ = child.cancelled() => { /* stop reading */ }
///         _ = read_next_chunk() => {}
///     }
/// });
///
/// token.cancel();
/// ```
#[derive(Debug, Clone)]
pub struct CancelToken {
    tx: Arc<watch::Sender<bool>>,
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(false);
        Self {
            tx: Arc::new(tx),
            rx,
        }
    }

    /// Signal cancellation to every clone. Idempotent.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    /// Check if cancellation has been signaled (non-blocking)
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Wait until the token is cancelled.
    ///
    /// Use this in a `select!` block next to the work being cancelled.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        loop {
            if *rx.borrow_and_update() {
                return;
            }
            // The sender lives as long as any clone of this token
            if rx.changed().await.is_err() {
                return;
            }
        }
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}
