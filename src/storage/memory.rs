//! In-memory [`KeyValueStore`] fake for tests.
//!
//! Behaves like the file-backed store but keeps everything in a `Mutex`-guarded
//! map, so store round-trip behavior can be exercised without touching disk.

use anyhow::Result;
use std::collections::HashMap;
use std::sync::Mutex;

use super::traits::KeyValueStore;

/// In-memory key-value store
#[derive(Default)]
pub struct MemoryKeyValueStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.remove(key);
        Ok(())
    }

    fn get_all_keys(&self) -> Result<Vec<String>> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        let mut keys: Vec<String> = values.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = MemoryKeyValueStore::new();

        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));

        store.remove("k").unwrap();
        assert!(store.get("k").unwrap().is_none());
    }

    #[test]
    fn test_get_all_keys_sorted() {
        let store = MemoryKeyValueStore::new();
        store.set("b", "2").unwrap();
        store.set("a", "1").unwrap();

        assert_eq!(store.get_all_keys().unwrap(), vec!["a".to_string(), "b".to_string()]);
    }
}
