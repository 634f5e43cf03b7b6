//! In-memory store for storebench
//!
//! A synchronous ordered map living inside the process. Every call returns
//! without suspending. An optional snapshot file lets the contents survive a
//! restart; it is only written when `persist` is called, so it never lands
//! inside a timed pass.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use bincode::{serialize, deserialize};
use log::debug;

use crate::core::errors::{Result, StoreError};
use crate::core::store::Store;

/// An in-memory store with an optional on-disk snapshot
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Map of keys to encoded values
    data: RwLock<BTreeMap<String, Vec<u8>>>,
    /// Where `persist` writes the snapshot
    snapshot: Option<PathBuf>,
}

impl MemoryStore {
    /// Create a new empty memory store with no snapshot
    pub fn new() -> Self {
        MemoryStore {
            data: RwLock::new(BTreeMap::new()),
            snapshot: None,
        }
    }

    /// Open a store backed by the snapshot at `path`, loading it if present
    pub fn open<P: Into<PathBuf>>(path: P) -> Result<Self> {
        let path = path.into();

        let data = if path.exists() {
            let bytes = fs::read(&path)?;
            let data: BTreeMap<String, Vec<u8>> = deserialize(&bytes)
                .map_err(|e| StoreError::DeserializationError(e.to_string()))?;
            debug!("MemoryStore: loaded {} keys from {:?}", data.len(), path);
            data
        } else {
            BTreeMap::new()
        };

        Ok(MemoryStore {
            data: RwLock::new(data),
            snapshot: Some(path),
        })
    }

    /// Write the snapshot file (no-op without one)
    pub fn persist(&self) -> Result<()> {
        let path = match &self.snapshot {
            Some(path) => path,
            None => return Ok(()),
        };

        let bytes = {
            let data = self.read()?;
            serialize(&*data).map_err(|e| StoreError::SerializationError(e.to_string()))?
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Readers never see a partially written snapshot
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, path)?;

        debug!("MemoryStore: snapshot written to {:?}", path);
        Ok(())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<String, Vec<u8>>>> {
        self.data
            .read()
            .map_err(|_| StoreError::Internal("memory store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<String, Vec<u8>>>> {
        self.data
            .write()
            .map_err(|_| StoreError::Internal("memory store lock poisoned".to_string()))
    }
}

impl Store for MemoryStore {
    fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        self.write()?.insert(key.to_string(), value);
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.read()?.get(key).cloned())
    }

    fn remove_prefix(&self, prefix: &str) -> Result<usize> {
        let mut data = self.write()?;

        let keys: Vec<String> = data
            .range(prefix.to_string()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, _)| k.clone())
            .collect();

        for key in &keys {
            data.remove(key);
        }

        Ok(keys.len())
    }

    fn count_prefix(&self, prefix: &str) -> Result<usize> {
        let count = self
            .read()?
            .range(prefix.to_string()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .count();

        Ok(count)
    }

    fn flush(&self) -> Result<()> {
        self.persist()
    }
}
