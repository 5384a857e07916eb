//! Key-Value store wrapper with automatic serialization.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::CacheError;
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

/// Where cached bytes live.
#[derive(Debug)]
enum Store {
    /// Process memory, lost on exit.
    Memory(Mutex<HashMap<String, Vec<u8>>>),
    /// One file per key inside a directory.
    Directory(PathBuf),
}

/// Type-safe cache over a key-value store.
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
#[derive(Debug)]
pub struct Cache {
    store: Store,
}

impl Cache {
    /// Open an in-memory store.
    ///
    /// # Example
    ///
    /// ```rust
    /// let cache = medishop_cache::Cache::open_default();
    /// cache.set("greeting", &"hello").unwrap();
    /// assert_eq!(cache.get::<String>("greeting").unwrap().as_deref(), Some("hello"));
    /// ```
    pub fn open_default() -> Self {
        Self {
            store: Store::Memory(Mutex::new(HashMap::new())),
        }
    }

    /// Open a store persisted under `dir`, creating the directory if needed.
    pub fn open_dir(dir: impl AsRef<Path>) -> Result<Self, CacheError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .map_err(|e| CacheError::OpenError(format!("{}: {}", dir.display(), e)))?;
        debug!(dir = %dir.display(), "opened directory cache");
        Ok(Self {
            store: Store::Directory(dir.to_path_buf()),
        })
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist, and an error if the stored
    /// bytes don't decode as `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.get_bytes(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.set_bytes(key, bytes)
    }

    /// Raw bytes for a key.
    pub fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        match &self.store {
            Store::Memory(map) => Ok(lock(map)?.get(key).cloned()),
            Store::Directory(dir) => match fs::read(file_for(dir, key)) {
                Ok(bytes) => Ok(Some(bytes)),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                Err(e) => Err(e.into()),
            },
        }
    }

    /// Store raw bytes under a key.
    pub fn set_bytes(&self, key: &str, bytes: Vec<u8>) -> Result<(), CacheError> {
        match &self.store {
            Store::Memory(map) => {
                lock(map)?.insert(key.to_string(), bytes);
                Ok(())
            }
            Store::Directory(dir) => {
                // Write then rename so a crash never leaves a half-written value.
                let target = file_for(dir, key);
                let tmp = target.with_extension("tmp");
                fs::write(&tmp, bytes)?;
                fs::rename(&tmp, &target)?;
                Ok(())
            }
        }
    }
}

fn lock(
    map: &Mutex<HashMap<String, Vec<u8>>>,
) -> Result<std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>>, CacheError> {
    map.lock()
        .map_err(|e| CacheError::StoreError(format!("memory store poisoned: {}", e)))
}

/// Keys are hex-encoded so any key maps to a portable file name.
fn file_for(dir: &Path, key: &str) -> PathBuf {
    let name: String = key.bytes().map(|b| format!("{:02x}", b)).collect();
    dir.join(format!("{}.json", name))
}

/// Helper to build cache keys with namespacing.
///
/// # Example
///
/// ```rust
/// let key = medishop_cache::cache_key!("medishop", "cart");
/// assert_eq!(key, "medishop:cart");
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
