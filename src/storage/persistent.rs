// src/storage/persistent.rs

use std::path::PathBuf;
use std::sync::Arc;

use log::debug;
use sled::Db;

use crate::core::errors::{Result, StoreError};
use crate::core::store::Store;

/// Synchronous sled engine behind `PersistentStore`
pub struct SledStore {
    /// The underlying sled database
    db: Db,
    /// Flush after every write
    sync_writes: bool,
}

impl SledStore {
    /// Open the sled database at the given path
    pub fn open<P: Into<PathBuf>>(path: P, sync_writes: bool) -> Result<Self> {
        let path = path.into();
        let db = sled::open(&path)?;

        debug!("SledStore: opened {:?} ({} keys)", path, db.len());
        Ok(SledStore { db, sync_writes })
    }

    fn maybe_flush(&self) -> Result<()> {
        if self.sync_writes {
            self.db.flush()?;
        }
        Ok(())
    }
}

impl Store for SledStore {
    fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        self.db.insert(key.as_bytes(), value)?;
        self.maybe_flush()
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.db.get(key.as_bytes())?.map(|v| v.to_vec()))
    }

    fn remove_prefix(&self, prefix: &str) -> Result<usize> {
        let mut batch = sled::Batch::default();
        let mut removed = 0;

        for item in self.db.scan_prefix(prefix.as_bytes()) {
            let (key, _) = item?;
            batch.remove(key);
            removed += 1;
        }

        self.db.apply_batch(batch)?;
        self.db.flush()?;

        Ok(removed)
    }

    fn count_prefix(&self, prefix: &str) -> Result<usize> {
        let mut count = 0;
        for item in self.db.scan_prefix(prefix.as_bytes()).keys() {
            item?;
            count += 1;
        }
        Ok(count)
    }

    fn flush(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }
}

/// A persistent store reachable only through awaited calls.
///
/// Every operation is handed to tokio's blocking pool, so callers suspend
/// until the disk I/O behind it has completed.
#[derive(Clone)]
pub struct PersistentStore {
    inner: Arc<SledStore>,
}

impl PersistentStore {
    /// Open a persistent store at the given path
    pub async fn open<P: Into<PathBuf>>(path: P, sync_writes: bool) -> Result<Self> {
        let path = path.into();
        let inner = blocking(move || SledStore::open(path, sync_writes)).await?;

        Ok(PersistentStore { inner: Arc::new(inner) })
    }

    pub async fn set(&self, key: String, value: Vec<u8>) -> Result<()> {
        let inner = Arc::clone(&self.inner);
        blocking(move || inner.set(&key, value)).await
    }

    pub async fn get(&self, key: String) -> Result<Option<Vec<u8>>> {
        let inner = Arc::clone(&self.inner);
        blocking(move || inner.get(&key)).await
    }

    pub async fn remove_prefix(&self, prefix: String) -> Result<usize> {
        let inner = Arc::clone(&self.inner);
        blocking(move || inner.remove_prefix(&prefix)).await
    }

    pub async fn count_prefix(&self, prefix: String) -> Result<usize> {
        let inner = Arc::clone(&self.inner);
        blocking(move || inner.count_prefix(&prefix)).await
    }

    pub async fn flush(&self) -> Result<()> {
        let inner = Arc::clone(&self.inner);
        blocking(move || inner.flush()).await
    }
}

async fn blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| StoreError::Internal(format!("Blocking task failed: {}", e)))?
}
