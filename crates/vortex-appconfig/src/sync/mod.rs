//! Background watch subscriptions.
//!
//! Each watch runs as its own task that polls the service on a fixed
//! interval and forwards every successful poll to the subscriber.

mod handle;
mod watcher;

pub use handle::WatchHandle;
pub(crate) use watcher::Watcher;
