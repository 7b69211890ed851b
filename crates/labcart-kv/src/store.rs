//! Key-value store backends and the typed wrapper.

use crate::KvError;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

/// Raw byte-oriented key-value storage.
///
/// Implementations must tolerate repeated reads of the same key and must
/// overwrite the whole value on every write. There are no partial updates.
pub trait KeyValueStore: Send + Sync {
    /// Get the raw bytes for a key, or `None` if the key doesn't exist.
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, KvError>;

    /// Overwrite the value for a key.
    fn set_raw(&self, key: &str, value: &[u8]) -> Result<(), KvError>;

    /// Delete a key. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), KvError>;

    /// Check whether a key exists.
    fn exists(&self, key: &str) -> Result<bool, KvError> {
        Ok(self.get_raw(key)?.is_some())
    }

    /// List all keys in the store.
    fn keys(&self) -> Result<Vec<String>, KvError>;
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>>, KvError> {
        self.entries
            .lock()
            .map_err(|_| KvError::Store("memory store lock poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, KvError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_raw(&self, key: &str, value: &[u8]) -> Result<(), KvError> {
        self.lock()?.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), KvError> {
        self.lock()?.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, KvError> {
        Ok(self.lock()?.keys().cloned().collect())
    }
}

/// File-backed store: one file per key under a root directory.
///
/// Keys are sanitized into filenames, so distinct keys that differ only in
/// non-alphanumeric characters may collide; namespaced keys built with
/// [`kv_key!`](crate::kv_key) stay distinct.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, KvError> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|e| KvError::Open(e.to_string()))?;
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.root.join(format!("{name}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, KvError> {
        match std::fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(KvError::Store(e.to_string())),
        }
    }

    fn set_raw(&self, key: &str, value: &[u8]) -> Result<(), KvError> {
        std::fs::write(self.path_for(key), value).map_err(|e| KvError::Store(e.to_string()))
    }

    fn delete(&self, key: &str) -> Result<(), KvError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(KvError::Store(e.to_string())),
        }
    }

    fn keys(&self) -> Result<Vec<String>, KvError> {
        let entries = std::fs::read_dir(&self.root).map_err(|e| KvError::Store(e.to_string()))?;
        let mut keys = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| KvError::Store(e.to_string()))?;
            if let Some(stem) = entry.path().file_stem().and_then(|s| s.to_str()) {
                keys.push(stem.to_string());
            }
        }
        Ok(keys)
    }
}

/// Typed wrapper with automatic JSON serialization.
///
/// A stored value that exists but fails to decode surfaces as
/// [`KvError::Serialize`]; callers decide their own recovery policy.
pub struct Kv<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Kv<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get a value, or `None` if the key doesn't exist.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, KvError> {
        match self.store.get_raw(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Set a value, overwriting any previous value.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), KvError> {
        let bytes = serde_json::to_vec(value)?;
        self.store.set_raw(key, &bytes)
    }

    /// Delete a value.
    pub fn delete(&self, key: &str) -> Result<(), KvError> {
        self.store.delete(key)
    }

    /// Check if a key exists.
    pub fn exists(&self, key: &str) -> Result<bool, KvError> {
        self.store.exists(key)
    }

    /// Access the underlying raw store.
    pub fn raw(&self) -> &S {
        &self.store
    }
}

/// Helper to build namespaced keys.
///
/// ```
/// let key = labcart_kv::kv_key!("cart", "session-1");
/// assert_eq!(key, "cart:session-1");
/// ```
#[macro_export]
macro_rules! kv_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}
