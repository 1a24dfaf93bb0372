//! Key/value backend trait definition.

use async_trait::async_trait;
use tokio::sync::{mpsc, watch};

use crate::error::Result;
use crate::event::WatchEvent;
use crate::pair::KvPairs;

/// A read-mostly source of configuration values addressed by key.
///
/// This trait abstracts over the remote services a configuration library can
/// pull from, so callers can read and watch keys without knowing how the
/// values are stored or fetched.
///
/// # Example
///
/// ```ignore
/// use vortex_kv::{KvBackend, WatchEvent};
///
/// let (stop_tx, stop_rx) = tokio::sync::watch::channel(false);
/// let mut updates = backend.watch("feature-flags", stop_rx);
///
/// while let Some(event) = updates.recv().await {
///     if let WatchEvent::Value(bytes) = event {
///         reload(&bytes);
///     }
/// }
/// ```
#[async_trait]
pub trait KvBackend: Send + Sync {
    /// Returns the current value for `key`.
    async fn get(&self, key: &str) -> Result<Vec<u8>>;

    /// Returns the pairs stored under `key`.
    ///
    /// Backends without hierarchical keys return a single pair.
    async fn list(&self, key: &str) -> Result<KvPairs>;

    /// Stores `value` under `key`.
    ///
    /// Read-only backends accept the call and do nothing.
    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Subscribes to updates for `key`.
    ///
    /// The subscription runs until `stop` carries `true` or its sender is
    /// dropped. The returned channel is closed once the subscription has
    /// terminated.
    fn watch(&self, key: &str, stop: watch::Receiver<bool>) -> mpsc::Receiver<WatchEvent>;

    /// Returns the name of this backend, used for logging.
    fn name(&self) -> &str;
}
