//! # Vortex AppConfig Backend
//!
//! Key/value backend for Vortex Config over an AppConfig-style remote
//! configuration service.
//!
//! ## Features
//!
//! - Versioned in-memory cache of the latest value per key
//! - Cache-first reads: only the first read of a key reaches the service
//! - Polling watches that send the cached version as change token
//! - Cooldown after failed polls; watches survive service errors
//! - Per-subscription stop signals plus bulk shutdown on drop
//!
//! The service client itself is supplied as a [`ConfigFetcher`].
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use vortex_appconfig::{AppConfigBackend, AppConfigSettings};
//! use vortex_kv::{KvBackend, WatchEvent};
//!
//! let settings = AppConfigSettings::builder()
//!     .application("billing")
//!     .environment("prod")
//!     .build()?;
//!
//! let backend = AppConfigBackend::new(settings, Arc::new(my_fetcher))?;
//! let flags = backend.get("feature-flags").await?;
//!
//! let (handle, mut updates) = backend.subscribe("feature-flags");
//! while let Some(WatchEvent::Value(bytes)) = updates.recv().await {
//!     apply(&bytes);
//! }
//! handle.stop();
//! ```

pub mod backend;
pub mod cache;
pub mod config;
pub mod fetcher;
pub mod sync;

// Re-exports
pub use backend::AppConfigBackend;
pub use cache::{CacheEntry, VersionedCache};
pub use config::{AppConfigSettings, AppConfigSettingsBuilder};
pub use fetcher::{ConfigFetcher, FetchFailure, FetchRequest, FetchedConfig};
pub use sync::WatchHandle;

// Re-export vortex_kv for consumers
pub use vortex_kv;
