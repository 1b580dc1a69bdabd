//! # File-Backed Key-Value Store
//!
//! Durable [`KeyValueStore`] implementation storing one file per key under a
//! base directory. `/`-separated key segments map to subdirectories, so
//! `auth/accessToken` lands at `{base}/auth/accessToken.json`.
//!
//! ## File Structure
//!
//! ```text
//! data/
//! ├── what_to_eat_today_store.json
//! ├── ingredients_store.json
//! ├── budget_store.json
//! ├── auth/
//! │   └── accessToken.json
//! └── debug/
//!     └── API_BASE.json
//! ```
//!
//! Writes use the atomic temp-file + rename pattern so a crash mid-write never
//! leaves a truncated value behind.

use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

use super::traits::KeyValueStore;

const VALUE_EXTENSION: &str = "json";

/// File-backed key-value store rooted at a base directory
#[derive(Clone)]
pub struct FileKeyValueStore {
    base_dir: PathBuf,
}

impl FileKeyValueStore {
    /// Create a store rooted at `base_dir`, creating the directory if needed
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir)
            .with_context(|| format!("failed to create data directory {:?}", base_dir))?;
        Ok(Self { base_dir })
    }

    /// Create a store at the platform default data directory
    pub fn with_default_dir() -> Result<Self> {
        Self::new(default_data_dir()?)
    }

    /// Base directory this store reads and writes under
    pub fn base_directory(&self) -> &Path {
        &self.base_dir
    }

    fn path_for_key(&self, key: &str) -> PathBuf {
        let mut path = self.base_dir.clone();
        let mut segments = key.split('/').filter(|s| !s.is_empty()).peekable();
        while let Some(segment) = segments.next() {
            if segments.peek().is_some() {
                path.push(segment);
            } else {
                // A segment may itself contain a '.', so append the extension
                path.push(format!("{}.{}", segment, VALUE_EXTENSION));
            }
        }
        path
    }

    fn collect_keys(&self, dir: &Path, prefix: &str, keys: &mut Vec<String>) -> Result<()> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            let name = match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => name,
                None => continue,
            };

            if path.is_dir() {
                let nested = if prefix.is_empty() {
                    name.to_string()
                } else {
                    format!("{}/{}", prefix, name)
                };
                self.collect_keys(&path, &nested, keys)?;
            } else if let Some(stem) = name.strip_suffix(&format!(".{}", VALUE_EXTENSION)) {
                if prefix.is_empty() {
                    keys.push(stem.to_string());
                } else {
                    keys.push(format!("{}/{}", prefix, stem));
                }
            }
        }
        Ok(())
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for_key(key);
        if !path.exists() {
            return Ok(None);
        }
        let value = fs::read_to_string(&path)
            .with_context(|| format!("failed to read value for key '{}'", key))?;
        Ok(Some(value))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for_key(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Atomic write: temp file in the same directory, then rename
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, value)
            .with_context(|| format!("failed to write value for key '{}'", key))?;
        fs::rename(&temp_path, &path)
            .with_context(|| format!("failed to commit value for key '{}'", key))?;

        debug!("Saved key '{}' to {:?}", key, path);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for_key(key);
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("failed to remove key '{}'", key))?;
            debug!("Removed key '{}'", key);
        }
        Ok(())
    }

    fn get_all_keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        if self.base_dir.exists() {
            self.collect_keys(&self.base_dir.clone(), "", &mut keys)?;
        }
        keys.sort();
        Ok(keys)
    }
}

/// Platform default data directory for the app
pub fn default_data_dir() -> Result<PathBuf> {
    let base = dirs::data_dir().context("no platform data directory available")?;
    Ok(base.join("what2eat"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (FileKeyValueStore, TempDir) {
        let _ = env_logger::builder().is_test(true).try_init();
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = FileKeyValueStore::new(temp_dir.path()).expect("Failed to create store");
        (store, temp_dir)
    }

    #[test]
    fn test_set_and_get_value() {
        let (store, _temp_dir) = setup();

        store.set("budget_store", r#"{"monthly_amount":100000.0}"#).unwrap();

        let value = store.get("budget_store").unwrap();
        assert_eq!(value.as_deref(), Some(r#"{"monthly_amount":100000.0}"#));
    }

    #[test]
    fn test_get_missing_key_returns_none() {
        let (store, _temp_dir) = setup();
        assert!(store.get("never_written").unwrap().is_none());
    }

    #[test]
    fn test_set_overwrites_previous_value() {
        let (store, _temp_dir) = setup();

        store.set("k", "first").unwrap();
        store.set("k", "second").unwrap();

        assert_eq!(store.get("k").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_namespaced_keys_map_to_subdirectories() {
        let (store, temp_dir) = setup();

        store.set("auth/accessToken", "tok-123").unwrap();

        assert!(temp_dir.path().join("auth").join("accessToken.json").exists());
        assert_eq!(store.get("auth/accessToken").unwrap().as_deref(), Some("tok-123"));
    }

    #[test]
    fn test_key_with_dot_in_final_segment_round_trips() {
        let (store, temp_dir) = setup();

        store.set("debug/API.BASE", "http://10.0.2.2:8080").unwrap();

        assert!(temp_dir.path().join("debug").join("API.BASE.json").exists());
        assert_eq!(
            store.get("debug/API.BASE").unwrap().as_deref(),
            Some("http://10.0.2.2:8080")
        );
        assert_eq!(store.get_all_keys().unwrap(), vec!["debug/API.BASE".to_string()]);

        store.remove("debug/API.BASE").unwrap();
        assert!(store.get("debug/API.BASE").unwrap().is_none());
    }

    #[test]
    fn test_remove_is_noop_for_missing_key() {
        let (store, _temp_dir) = setup();
        store.remove("missing").unwrap();
    }

    #[test]
    fn test_get_all_keys_includes_namespaced_keys() {
        let (store, _temp_dir) = setup();

        store.set("what_to_eat_today_store", "{}").unwrap();
        store.set("auth/accessToken", "tok").unwrap();
        store.set("debug/API_BASE", "http://10.0.2.2:8080").unwrap();

        let keys = store.get_all_keys().unwrap();
        assert_eq!(
            keys,
            vec![
                "auth/accessToken".to_string(),
                "debug/API_BASE".to_string(),
                "what_to_eat_today_store".to_string(),
            ]
        );
    }

    #[test]
    fn test_multi_remove() {
        let (store, _temp_dir) = setup();

        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        store.set("c", "3").unwrap();

        store
            .multi_remove(&["a".to_string(), "c".to_string(), "missing".to_string()])
            .unwrap();

        let keys = store.get_all_keys().unwrap();
        assert_eq!(keys, vec!["b".to_string()]);
    }
}
