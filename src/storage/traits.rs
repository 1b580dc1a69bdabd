//! # Storage Traits
//!
//! This module defines the key-value storage abstraction that allows different
//! backing stores to be used interchangeably by the domain layer.

use anyhow::Result;

/// Trait defining the interface for key-value backing store operations.
///
/// Keys are flat strings; `/`-separated segments act as informal namespaces
/// (e.g. `auth/accessToken`, `debug/API_BASE`). Values are opaque strings,
/// in practice serialized JSON blobs.
///
/// Implementations must be safe to share behind an `Arc` across the stores.
pub trait KeyValueStore: Send + Sync {
    /// Retrieve the value stored under `key`, or `None` if the key is absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the value stored under `key`; absent keys are not an error
    fn remove(&self, key: &str) -> Result<()>;

    /// Remove every key in `keys`; absent keys are skipped
    fn multi_remove(&self, keys: &[String]) -> Result<()> {
        for key in keys {
            self.remove(key)?;
        }
        Ok(())
    }

    /// List every key currently present in the store
    fn get_all_keys(&self) -> Result<Vec<String>>;
}
