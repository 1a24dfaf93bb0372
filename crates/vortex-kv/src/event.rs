//! Events delivered by watch subscriptions.

use crate::error::BackendError;

/// A single update delivered on a watch channel.
///
/// Exactly one of value or error is present.
#[derive(Debug)]
pub enum WatchEvent {
    /// The latest value for the watched key.
    Value(Vec<u8>),
    /// A failure the backend chose to report to the consumer.
    Error(BackendError),
}

impl WatchEvent {
    /// Returns the value bytes, if this is a value event.
    pub fn value(&self) -> Option<&[u8]> {
        match self {
            Self::Value(value) => Some(value),
            Self::Error(_) => None,
        }
    }

    /// Returns the error, if this is an error event.
    pub fn error(&self) -> Option<&BackendError> {
        match self {
            Self::Value(_) => None,
            Self::Error(err) => Some(err),
        }
    }

    /// Returns true for error events.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Converts the event into a `Result`.
    pub fn into_result(self) -> Result<Vec<u8>, BackendError> {
        match self {
            Self::Value(value) => Ok(value),
            Self::Error(err) => Err(err),
        }
    }
}

impl From<Result<Vec<u8>, BackendError>> for WatchEvent {
    fn from(result: Result<Vec<u8>, BackendError>) -> Self {
        match result {
            Ok(value) => Self::Value(value),
            Err(err) => Self::Error(err),
        }
    }
}
