//! # Vortex KV
//!
//! Key/value backend abstraction for Vortex Config.
//!
//! A backend exposes four operations over opaque configuration keys:
//!
//! - `get` reads the current value
//! - `list` returns the pairs under a key
//! - `set` writes a value (a no-op for read-only sources)
//! - `watch` streams updates until a stop signal fires
//!
//! Concrete backends live in their own crates, e.g. `vortex-appconfig`.

pub mod backend;
pub mod error;
pub mod event;
pub mod pair;

// Re-exports
pub use backend::KvBackend;
pub use error::{BackendError, BoxError, Result};
pub use event::WatchEvent;
pub use pair::{KvPair, KvPairs};
