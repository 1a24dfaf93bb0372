//! In-memory cache of the latest configuration version per key.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use parking_lot::RwLock;

/// The version token and payload stored for one key.
///
/// Both fields are always written together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// Opaque change token assigned by the service.
    pub version: Option<String>,
    /// Configuration payload at that version.
    pub value: Vec<u8>,
}

/// Concurrency-safe map from configuration key to its latest known entry.
///
/// Reads take a shared lock and return copies, so callers never alias the
/// bytes held by the cache. Entries are replaced whole and never removed.
#[derive(Debug, Default)]
pub struct VersionedCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl VersionedCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the entry for `key`.
    pub fn read(&self, key: &str) -> Option<CacheEntry> {
        self.entries.read().get(key).cloned()
    }

    /// Returns a copy of the value for `key`.
    pub fn value(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.read().get(key).map(|entry| entry.value.clone())
    }

    /// Returns the version token for `key`.
    ///
    /// `None` both when the key was never fetched and when the service
    /// assigned no version.
    pub fn version(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .get(key)
            .and_then(|entry| entry.version.clone())
    }

    /// Replaces the entry for `key` and returns a copy of the stored value.
    pub fn write(&self, key: &str, version: Option<String>, value: Vec<u8>) -> Vec<u8> {
        let copy = value.clone();
        self.entries
            .write()
            .insert(key.to_string(), CacheEntry { version, value });
        copy
    }

    /// Stores the entry only if `key` has no entry yet.
    ///
    /// Returns a copy of whichever entry the cache holds afterwards.
    pub fn write_if_absent(
        &self,
        key: &str,
        version: Option<String>,
        value: Vec<u8>,
    ) -> CacheEntry {
        let mut entries = self.entries.write();
        match entries.entry(key.to_string()) {
            Entry::Occupied(existing) => existing.get().clone(),
            Entry::Vacant(slot) => slot.insert(CacheEntry { version, value }).clone(),
        }
    }

    /// Returns true if `key` has been cached.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.read().contains_key(key)
    }

    /// Returns the number of cached keys.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
