//! Error types for key/value configuration backends.
//!
//! Backends surface exactly one steady-state error kind, [`BackendError::Fetch`],
//! which carries the key that was requested and the opaque cause reported by
//! the remote service. Construction-time problems use the separate
//! [`BackendError::Initialization`] and [`BackendError::InvalidConfig`] variants.
//!
//! # Example
//!
//! ```
//! use vortex_kv::{BackendError, Result};
//!
//! fn application_name(machines: &[String]) -> Result<&str> {
//!     machines
//!         .first()
//!         .map(String::as_str)
//!         .ok_or_else(|| BackendError::initialization("application should be defined"))
//! }
//!
//! assert!(application_name(&[]).is_err());
//! ```

use thiserror::Error;

/// Opaque cause reported by a remote configuration service.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors returned by a [`KvBackend`](crate::KvBackend).
#[derive(Debug, Error)]
pub enum BackendError {
    /// Fetching the configuration for a key failed.
    #[error("getting configuration for {key}: {source}")]
    Fetch {
        /// Key that was requested
        key: String,
        /// Underlying cause, passed through verbatim
        #[source]
        source: BoxError,
    },

    /// The backend could not be constructed.
    #[error("initialization error: {0}")]
    Initialization(String),

    /// The backend settings are invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl BackendError {
    /// Creates a Fetch error for the given key.
    pub fn fetch(key: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Fetch {
            key: key.into(),
            source: source.into(),
        }
    }

    /// Creates an Initialization error.
    pub fn initialization(message: impl Into<String>) -> Self {
        Self::Initialization(message.into())
    }

    /// Creates an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// Returns true if this error came from a fetch.
    pub fn is_fetch_error(&self) -> bool {
        matches!(self, Self::Fetch { .. })
    }

    /// Returns the key a fetch error refers to.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Fetch { key, .. } => Some(key),
            _ => None,
        }
    }
}

/// Type alias for Results with BackendError.
pub type Result<T> = std::result::Result<T, BackendError>;
