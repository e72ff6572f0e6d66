//! Key-value store.
//!
//! The persistence collaborator everything else sits on: string keys, JSON
//! values, absent keys read back as `None`. [`MemoryStore`] backs tests and
//! one-shot runs; [`JsonFileStore`] keeps the same records across runs in a
//! single JSON file, write-through on every mutation. Durability beyond
//! that (locking, atomic renames) is deliberately out of scope.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Fixed key catalog shared by the services.
pub mod keys {
    pub const AUTH_TOKEN: &str = "authToken";
    pub const USER_DATA: &str = "userData";
    pub const USERS: &str = "users";
    pub const CREDENTIALS: &str = "credentials";
    pub const FAVORITES: &str = "favorites";
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage io: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage encoding: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Raw string-keyed storage. Object safe; typed access goes through
/// [`KvStoreExt`].
pub trait KvStore: Send + Sync {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_raw(&self, key: &str, value: String) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
    fn clear(&self) -> Result<(), StoreError>;

    fn exists(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.get_raw(key)?.is_some())
    }
}

/// JSON-typed access over any [`KvStore`].
pub trait KvStoreExt: KvStore {
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.get_raw(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        self.set_raw(key, serde_json::to_string(value)?)
    }
}

impl<S: KvStore + ?Sized> KvStoreExt for S {}

/// Volatile store; contents die with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set_raw(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.lock().insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.lock().remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.entries.lock().clear();
        Ok(())
    }
}

/// Store backed by one JSON file: loaded on open, rewritten on every
/// mutation.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl JsonFileStore {
    /// Open `path`, loading existing entries; a missing file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(JsonFileStore { path, entries: Mutex::new(entries) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &HashMap<String, String>) -> Result<(), StoreError> {
        fs::write(&self.path, serde_json::to_string_pretty(entries)?)?;
        Ok(())
    }
}

impl KvStore for JsonFileStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set_raw(&self, key: &str, value: String) -> Result<(), StoreError> {
        let mut entries = self.entries.lock();
        entries.insert(key.to_string(), value);
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock();
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut entries = self.entries.lock();
        entries.clear();
        self.persist(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Record {
        name: String,
        count: u32,
    }

    #[test]
    fn memory_store_round_trips_typed_values() {
        let store = MemoryStore::new();
        let record = Record { name: "fiat".to_string(), count: 2 };

        assert!(store.get::<Record>("r").unwrap().is_none());
        store.set("r", &record).unwrap();
        assert_eq!(store.get::<Record>("r").unwrap(), Some(record));
        assert!(store.exists("r").unwrap());

        store.remove("r").unwrap();
        assert!(!store.exists("r").unwrap());
    }

    #[test]
    fn memory_store_clear_empties_everything() {
        let store = MemoryStore::new();
        store.set("a", &1u32).unwrap();
        store.set("b", &2u32).unwrap();
        store.clear().unwrap();
        assert!(store.get::<u32>("a").unwrap().is_none());
        assert!(store.get::<u32>("b").unwrap().is_none());
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        {
            let store = JsonFileStore::open(&path).unwrap();
            store.set("record", &Record { name: "uno".to_string(), count: 1 }).unwrap();
        }

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(
            store.get::<Record>("record").unwrap(),
            Some(Record { name: "uno".to_string(), count: 1 })
        );
    }

    #[test]
    fn file_store_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("fresh.json")).unwrap();
        assert!(store.get::<u32>("anything").unwrap().is_none());
    }

    #[test]
    fn file_store_rejects_corrupt_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(JsonFileStore::open(&path), Err(StoreError::Serde(_))));
    }
}
