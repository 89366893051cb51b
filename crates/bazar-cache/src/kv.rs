//! Key-Value store port with automatic serialization.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::CacheError;
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

/// A synchronous string key-value store.
///
/// Mirrors the semantics of browser local storage: values are opaque strings,
/// reads and writes complete immediately, and there is no cross-process
/// coordination. Two writers racing on the same backing store resolve as
/// last writer wins.
pub trait KvStore: Send + Sync {
    /// Read the raw value stored under `key`.
    fn get_raw(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Store a raw value under `key`, replacing any previous value.
    fn set_raw(&self, key: &str, value: String) -> Result<(), CacheError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// List all keys currently stored.
    fn keys(&self) -> Result<Vec<String>, CacheError>;
}

/// In-memory store. Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>, CacheError> {
        self.entries
            .lock()
            .map_err(|e| CacheError::Poisoned(e.to_string()))
    }
}

impl KvStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_raw(&self, key: &str, value: String) -> Result<(), CacheError> {
        self.lock()?.insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.lock()?.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        Ok(self.lock()?.keys().cloned().collect())
    }
}

/// Store persisted as a single JSON object on disk.
///
/// Every write re-reads the file, applies the change and writes the whole
/// object back through a temporary file followed by a rename.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Open (or lazily create) a store at `path`.
    ///
    /// The parent directory is created if it does not exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| CacheError::Open(format!("{}: {}", parent.display(), e)))?;
            }
        }
        Ok(Self { path })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, CacheError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), CacheError> {
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_vec_pretty(entries)?)?;
        std::fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), keys = entries.len(), "store flushed");
        Ok(())
    }
}

impl KvStore for FileStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set_raw(&self, key: &str, value: String) -> Result<(), CacheError> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value);
        self.write_all(&entries)
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        Ok(self.read_all()?.into_keys().collect())
    }
}

/// Type-safe cache over any [`KvStore`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
#[derive(Debug, Clone)]
pub struct Cache<S> {
    store: S,
}

impl<S: KvStore> Cache<S> {
    /// Wrap a store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get_raw(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let raw = serde_json::to_string(value)?;
        self.store.set_raw(key, raw)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.store.get_raw(key)?.is_some())
    }

    /// Get all keys in the cache.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.store.keys()
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Helper to build cache keys with namespacing.
///
/// # Example
///
/// ```rust
/// let key = bazar_cache::cache_key!("cart", "user123");
/// assert_eq!(key, "cart:user123");
/// ```
#[macro_export]
macro_rules! cache_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Item {
        id: u64,
        title: String,
    }

    #[test]
    fn test_memory_round_trip() {
        let cache = Cache::new(MemoryStore::new());
        let items = vec![Item { id: 1, title: "SICP".into() }];

        cache.set("items", &items).unwrap();
        let loaded: Option<Vec<Item>> = cache.get("items").unwrap();
        assert_eq!(loaded, Some(items));
    }

    #[test]
    fn test_missing_key_is_none() {
        let cache = Cache::new(MemoryStore::new());
        let loaded: Option<Vec<Item>> = cache.get("nothing").unwrap();
        assert!(loaded.is_none());
        assert!(!cache.exists("nothing").unwrap());
    }

    #[test]
    fn test_memory_clones_share_state() {
        let store = MemoryStore::new();
        let a = Cache::new(store.clone());
        let b = Cache::new(store);

        a.set("k", &42).unwrap();
        assert_eq!(b.get::<i32>("k").unwrap(), Some(42));
    }

    #[test]
    fn test_corrupt_value_is_error() {
        let store = MemoryStore::new();
        store.set_raw("items", "not json".into()).unwrap();
        let cache = Cache::new(store);
        assert!(cache.get::<Vec<Item>>("items").is_err());
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        {
            let cache = Cache::new(FileStore::open(&path).unwrap());
            cache.set("userId", "u-7").unwrap();
            cache.set("isAdmin", &true).unwrap();
        }

        let cache = Cache::new(FileStore::open(&path).unwrap());
        assert_eq!(cache.get::<String>("userId").unwrap().as_deref(), Some("u-7"));
        assert_eq!(cache.get::<bool>("isAdmin").unwrap(), Some(true));
        assert_eq!(cache.keys().unwrap(), vec!["isAdmin".to_string(), "userId".to_string()]);
    }

    #[test]
    fn test_file_store_delete() {
        let dir = tempfile::tempdir().unwrap();
        let cache = Cache::new(FileStore::open(dir.path().join("s.json")).unwrap());

        cache.set("a", &1).unwrap();
        cache.delete("a").unwrap();
        cache.delete("a").unwrap();
        assert!(!cache.exists("a").unwrap());
    }

    #[test]
    fn test_cache_key_macro() {
        assert_eq!(cache_key!("orders", "u1", 3), "orders:u1:3");
    }
}
