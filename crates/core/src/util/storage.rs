//! Best-effort key-value persistence.
//!
//! [`KeyValueStore`] is the fallible backend (`localStorage` in the
//! browser, [`MemoryStore`] elsewhere). [`Storage`] wraps one with JSON
//! encoding and never surfaces an error: failures are logged and turned
//! into the caller's default value or a `false` success flag.

use std::collections::BTreeMap;

use log::warn;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("quota exceeded while writing `{key}`")]
    QuotaExceeded { key: String },
    #[error("access denied: {0}")]
    AccessDenied(String),
    #[error("could not encode `{key}`: {source}")]
    Encode {
        key: String,
        source: serde_json::Error,
    },
    #[error("could not decode `{key}`: {source}")]
    Decode {
        key: String,
        source: serde_json::Error,
    },
}

/// A string-to-string store whose every operation may fail.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
    fn clear(&mut self) -> Result<(), StorageError>;
}

/// In-memory store with an optional quota on the total bytes of keys and
/// values, to exercise the quota-exceeded path.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: BTreeMap<String, String>,
    quota_bytes: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            items: BTreeMap::new(),
            quota_bytes: Some(quota_bytes),
        }
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.items
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(quota) = self.quota_bytes
            && self.used_bytes_without(key) + key.len() + value.len() > quota
        {
            return Err(StorageError::QuotaExceeded {
                key: key.to_string(),
            });
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.items.remove(key);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.items.clear();
        Ok(())
    }
}

/// JSON-valued view over a [`KeyValueStore`] that degrades gracefully.
#[derive(Debug, Clone)]
pub struct Storage<S> {
    store: Option<S>,
}

impl<S: KeyValueStore> Storage<S> {
    pub fn new(store: S) -> Self {
        Self { store: Some(store) }
    }

    /// A storage whose backend could not be obtained (private browsing,
    /// disabled cookies). Every read yields the default.
    pub fn unavailable() -> Self {
        Self { store: None }
    }

    pub fn is_available(&self) -> bool {
        self.store.is_some()
    }

    /// Read and decode `key`, or `default` when it is missing, empty,
    /// undecodable, or the store fails.
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.try_get(key) {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(err) => {
                warn!("could not read `{key}` from storage: {err}");
                default
            }
        }
    }

    /// Encode and write `value`. Returns whether the write succeeded.
    pub fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> bool {
        match self.try_set(key, value) {
            Ok(()) => true,
            Err(err) => {
                warn!("could not save `{key}` to storage: {err}");
                false
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> bool {
        let result = match self.store.as_mut() {
            Some(store) => store.remove(key),
            None => Err(StorageError::Unavailable),
        };
        result
            .inspect_err(|err| warn!("could not remove `{key}` from storage: {err}"))
            .is_ok()
    }

    pub fn clear(&mut self) -> bool {
        let result = match self.store.as_mut() {
            Some(store) => store.clear(),
            None => Err(StorageError::Unavailable),
        };
        result
            .inspect_err(|err| warn!("could not clear storage: {err}"))
            .is_ok()
    }

    fn try_get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let store = self.store.as_ref().ok_or(StorageError::Unavailable)?;
        match store.get(key)? {
            Some(raw) if !raw.is_empty() => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|source| StorageError::Decode {
                    key: key.to_string(),
                    source,
                }),
            _ => Ok(None),
        }
    }

    fn try_set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), StorageError> {
        let store = self.store.as_mut().ok_or(StorageError::Unavailable)?;
        let raw = serde_json::to_string(value).map_err(|source| StorageError::Encode {
            key: key.to_string(),
            source,
        })?;
        store.set(key, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Prefs {
        theme: String,
        visits: u32,
    }

    /// Store that refuses everything, like a sandboxed iframe.
    struct DeniedStore;

    impl KeyValueStore for DeniedStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::AccessDenied("sandboxed".into()))
        }
        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::AccessDenied("sandboxed".into()))
        }
        fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::AccessDenied("sandboxed".into()))
        }
        fn clear(&mut self) -> Result<(), StorageError> {
            Err(StorageError::AccessDenied("sandboxed".into()))
        }
    }

    #[test]
    fn stores_json_values() {
        let mut storage = Storage::new(MemoryStore::new());
        let prefs = Prefs {
            theme: "dark".into(),
            visits: 3,
        };
        assert!(storage.set("prefs", &prefs));
        assert_eq!(
            storage.get(
                "prefs",
                Prefs {
                    theme: "light".into(),
                    visits: 0
                }
            ),
            prefs
        );
        assert!(storage.remove("prefs"));
        assert_eq!(storage.get("prefs", 7u32), 7);
    }

    #[test]
    fn undecodable_value_yields_default() {
        let mut store = MemoryStore::new();
        store.set("count", "not json").unwrap_or(());
        store.set("empty", "").unwrap_or(());
        let storage = Storage::new(store);
        assert_eq!(storage.get("count", 1u8), 1);
        assert_eq!(storage.get("empty", 2u8), 2);
    }

    #[test]
    fn quota_failure_reports_false() {
        let mut storage = Storage::new(MemoryStore::with_quota(16));
        assert!(storage.set("k", "short"));
        assert!(!storage.set("big", &"x".repeat(64)));
        assert_eq!(storage.get("k", String::new()), "short");
    }

    #[test]
    fn failing_backend_never_panics() {
        let mut storage = Storage::new(DeniedStore);
        assert_eq!(storage.get("anything", 5i32), 5);
        assert!(!storage.set("anything", &1));
        assert!(!storage.remove("anything"));
        assert!(!storage.clear());
    }

    #[test]
    fn unavailable_storage_degrades() {
        let mut storage: Storage<MemoryStore> = Storage::unavailable();
        assert!(!storage.is_available());
        assert_eq!(storage.get("x", vec![1, 2]), vec![1, 2]);
        assert!(!storage.set("x", &[3]));
        assert!(!storage.clear());
    }
}
