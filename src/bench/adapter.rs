//! Backend adapters
//!
//! Both storage engines are driven through the same async contract. The fast
//! adapter wraps synchronous calls, so its futures are ready as soon as they
//! are polled; the persistent adapter awaits real disk I/O. Callers never
//! branch on which one they hold.

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use crate::bench::probe::RunManifest;
use crate::core::backend::BackendKind;
use crate::core::errors::{Result, StoreError};
use crate::core::key::{Key, Namespace};
use crate::core::payload::Payload;
use crate::core::store::Store;
use crate::core::workload::Record;
use crate::storage::{MemoryStore, PersistentStore};

/// Values fetched by one read pass, in key order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadOutcome {
    pub values: Vec<Option<Payload>>,
}

impl ReadOutcome {
    /// Keys that were present
    pub fn hits(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Keys that were absent
    pub fn misses(&self) -> usize {
        self.values.len() - self.hits()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Uniform contract over one storage engine
#[async_trait]
pub trait StoreAdapter: Send + Sync {
    /// Which backend this adapter drives
    fn kind(&self) -> BackendKind;

    /// Write every record; the first failure aborts the pass
    async fn write_all(&self, records: &[Record]) -> Result<()>;

    /// Read every key; an absent key is a miss, not an error
    async fn read_all(&self, keys: &[Key]) -> Result<ReadOutcome>;

    /// Store the run manifest sentinel
    async fn write_manifest(&self, namespace: &Namespace, manifest: &RunManifest) -> Result<()>;

    /// Fetch the run manifest sentinel, if present
    async fn read_manifest(&self, namespace: &Namespace) -> Result<Option<RunManifest>>;

    /// Delete every key in the namespace, returning how many were removed
    async fn clear_namespace(&self, namespace: &Namespace) -> Result<usize>;
}

fn ensure_cleared(namespace: &Namespace, remaining: usize) -> Result<()> {
    if remaining > 0 {
        return Err(StoreError::Internal(format!(
            "{} keys remain under {} after clear",
            remaining, namespace
        )));
    }
    Ok(())
}

/// Adapter over the in-process `MemoryStore`
pub struct FastAdapter {
    store: Arc<MemoryStore>,
}

impl FastAdapter {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        FastAdapter { store }
    }
}

#[async_trait]
impl StoreAdapter for FastAdapter {
    fn kind(&self) -> BackendKind {
        BackendKind::Fast
    }

    async fn write_all(&self, records: &[Record]) -> Result<()> {
        for record in records {
            self.store.set(record.key.as_str(), record.value.encode()?)?;
        }
        Ok(())
    }

    async fn read_all(&self, keys: &[Key]) -> Result<ReadOutcome> {
        let mut values = Vec::with_capacity(keys.len());
        for key in keys {
            let value = match self.store.get(key.as_str())? {
                Some(bytes) => Some(Payload::decode(&bytes)?),
                None => None,
            };
            values.push(value);
        }
        Ok(ReadOutcome { values })
    }

    async fn write_manifest(&self, namespace: &Namespace, manifest: &RunManifest) -> Result<()> {
        self.store.set(namespace.manifest().as_str(), manifest.encode()?)?;
        self.store.flush()
    }

    async fn read_manifest(&self, namespace: &Namespace) -> Result<Option<RunManifest>> {
        match self.store.get(namespace.manifest().as_str())? {
            Some(bytes) => Ok(Some(RunManifest::decode(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn clear_namespace(&self, namespace: &Namespace) -> Result<usize> {
        let prefix = namespace.prefix();
        let removed = self.store.remove_prefix(&prefix)?;
        ensure_cleared(namespace, self.store.count_prefix(&prefix)?)?;
        self.store.flush()?;
        debug!("FastAdapter: removed {} keys under {}", removed, namespace);
        Ok(removed)
    }
}

/// Adapter over the sled-backed `PersistentStore`
pub struct PersistentAdapter {
    store: PersistentStore,
}

impl PersistentAdapter {
    pub fn new(store: PersistentStore) -> Self {
        PersistentAdapter { store }
    }
}

#[async_trait]
impl StoreAdapter for PersistentAdapter {
    fn kind(&self) -> BackendKind {
        BackendKind::Persistent
    }

    async fn write_all(&self, records: &[Record]) -> Result<()> {
        for record in records {
            let bytes = record.value.encode()?;
            self.store.set(record.key.to_string(), bytes).await?;
        }
        Ok(())
    }

    async fn read_all(&self, keys: &[Key]) -> Result<ReadOutcome> {
        let mut values = Vec::with_capacity(keys.len());
        for key in keys {
            let value = match self.store.get(key.to_string()).await? {
                Some(bytes) => Some(Payload::decode(&bytes)?),
                None => None,
            };
            values.push(value);
        }
        Ok(ReadOutcome { values })
    }

    async fn write_manifest(&self, namespace: &Namespace, manifest: &RunManifest) -> Result<()> {
        self.store
            .set(namespace.manifest().to_string(), manifest.encode()?)
            .await?;
        self.store.flush().await
    }

    async fn read_manifest(&self, namespace: &Namespace) -> Result<Option<RunManifest>> {
        match self.store.get(namespace.manifest().to_string()).await? {
            Some(bytes) => Ok(Some(RunManifest::decode(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn clear_namespace(&self, namespace: &Namespace) -> Result<usize> {
        let removed = self.store.remove_prefix(namespace.prefix()).await?;
        ensure_cleared(namespace, self.store.count_prefix(namespace.prefix()).await?)?;
        debug!("PersistentAdapter: removed {} keys under {}", removed, namespace);
        Ok(removed)
    }
}

/// The two adapters a test runs against
#[derive(Clone)]
pub struct AdapterPair {
    fast: Arc<dyn StoreAdapter>,
    persistent: Arc<dyn StoreAdapter>,
}

impl AdapterPair {
    pub fn new(fast: Arc<dyn StoreAdapter>, persistent: Arc<dyn StoreAdapter>) -> Self {
        AdapterPair { fast, persistent }
    }

    /// Adapter for the given backend
    pub fn get(&self, kind: BackendKind) -> &dyn StoreAdapter {
        match kind {
            BackendKind::Fast => self.fast.as_ref(),
            BackendKind::Persistent => self.persistent.as_ref(),
        }
    }
}
