//! Key/value pair returned by list operations.

use serde::{Deserialize, Serialize};

/// A configuration key together with its value bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvPair {
    /// The configuration key.
    pub key: String,
    /// The raw configuration payload.
    pub value: Vec<u8>,
}

impl KvPair {
    /// Creates a new pair.
    pub fn new(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// List of pairs as returned by [`KvBackend::list`](crate::KvBackend::list).
pub type KvPairs = Vec<KvPair>;
