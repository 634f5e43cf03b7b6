use std::path::{Path as StdPath, PathBuf};

use crate::core::key::Namespace;

/// Directory used when none is configured
pub const DEFAULT_DATA_DIR: &str = ".storebench";

const FAST_SNAPSHOT_FILE: &str = "fast.snapshot";
const PERSISTENT_DIR: &str = "persistent";

/// Configuration of a benchmark session
#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// Directory holding both stores
    pub data_dir: PathBuf,
    /// Namespace every test key is written under
    pub namespace: Namespace,
    /// Flush the persistent store after every write
    pub sync_writes: bool,
    /// Keep a snapshot of the fast store on disk between runs
    pub snapshot_fast_store: bool,
}

impl BenchConfig {
    pub fn new<P: AsRef<StdPath>>(data_dir: P) -> Self {
        BenchConfig {
            data_dir: data_dir.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    pub fn with_namespace(mut self, namespace: Namespace) -> Self {
        self.namespace = namespace;
        self
    }

    pub fn with_sync_writes(mut self, sync_writes: bool) -> Self {
        self.sync_writes = sync_writes;
        self
    }

    pub fn with_fast_snapshot(mut self, enabled: bool) -> Self {
        self.snapshot_fast_store = enabled;
        self
    }

    /// Snapshot file of the fast store, if snapshots are enabled
    pub fn fast_snapshot_path(&self) -> Option<PathBuf> {
        if self.snapshot_fast_store {
            Some(self.data_dir.join(FAST_SNAPSHOT_FILE))
        } else {
            None
        }
    }

    /// Directory of the persistent store
    pub fn persistent_path(&self) -> PathBuf {
        self.data_dir.join(PERSISTENT_DIR)
    }
}

impl Default for BenchConfig {
    fn default() -> Self {
        BenchConfig {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            namespace: Namespace::default(),
            sync_writes: true,
            snapshot_fast_store: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_derive_from_data_dir() {
        let config = BenchConfig::new("/tmp/bench");

        assert_eq!(config.persistent_path(), PathBuf::from("/tmp/bench/persistent"));
        assert_eq!(
            config.fast_snapshot_path(),
            Some(PathBuf::from("/tmp/bench/fast.snapshot"))
        );
        assert_eq!(config.with_fast_snapshot(false).fast_snapshot_path(), None);
    }

    #[test]
    fn test_defaults() {
        let config = BenchConfig::default();

        assert_eq!(config.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
        assert_eq!(config.namespace.as_str(), "storebench");
        assert!(config.sync_writes);
    }
}
