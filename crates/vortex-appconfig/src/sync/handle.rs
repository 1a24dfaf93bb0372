//! Stop handle for watch subscriptions.

use tokio::sync::watch;

/// Handle for stopping a running watch subscription.
///
/// Dropping the handle stops the subscription as well.
#[derive(Debug)]
pub struct WatchHandle {
    /// Sender to signal shutdown.
    stop_tx: watch::Sender<bool>,
}

impl WatchHandle {
    /// Creates a handle together with the stop signal to pass to a watch.
    pub fn new() -> (Self, watch::Receiver<bool>) {
        let (stop_tx, stop_rx) = watch::channel(false);
        (Self { stop_tx }, stop_rx)
    }

    /// Signals the subscription to stop.
    pub fn stop(&self) {
        let _ = self.stop_tx.send(true);
    }

    /// Returns true once `stop` has been called.
    pub fn is_stopped(&self) -> bool {
        *self.stop_tx.borrow()
    }
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
