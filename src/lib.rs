//! storebench: write/read latency comparison of two key-value stores
//!
//! This crate times the same deterministic workload against an in-process
//! synchronous store and an on-disk store reached through awaited calls,
//! and hands back plain result records.

pub mod bench;
pub mod core;
pub mod storage;

use std::sync::Arc;

use log::info;

use crate::bench::adapter::{AdapterPair, FastAdapter, PersistentAdapter, StoreAdapter};
use crate::bench::probe::{self, RunManifest};
use crate::bench::runner::TimedRunner;
use crate::core::backend::PASS_ORDER;
use crate::core::errors::{BackendFailure, Operation};
use crate::core::workload::Workload;
use crate::storage::{MemoryStore, PersistentStore};

/// Main API for running storage benchmarks
pub struct StoreBench {
    adapters: AdapterPair,
    workload: Workload,
    runner: TimedRunner,
}

impl StoreBench {
    /// Open both stores under the configured data directory
    pub async fn open(config: &BenchConfig) -> BenchResult<Self> {
        let fast = match config.fast_snapshot_path() {
            Some(path) => MemoryStore::open(path),
            None => Ok(MemoryStore::new()),
        }
        .map_err(|e| BackendFailure::new(BackendKind::Fast, Operation::Open, e))?;

        let persistent = PersistentStore::open(config.persistent_path(), config.sync_writes)
            .await
            .map_err(|e| BackendFailure::new(BackendKind::Persistent, Operation::Open, e))?;

        info!("Opened stores under {:?}", config.data_dir);

        Ok(StoreBench::with_adapters(
            config.namespace.clone(),
            Arc::new(FastAdapter::new(Arc::new(fast))),
            Arc::new(PersistentAdapter::new(persistent)),
        ))
    }

    /// Build a harness over arbitrary adapters
    pub fn with_adapters(
        namespace: Namespace,
        fast: Arc<dyn StoreAdapter>,
        persistent: Arc<dyn StoreAdapter>,
    ) -> Self {
        StoreBench {
            adapters: AdapterPair::new(fast, persistent),
            workload: Workload::new(namespace),
            runner: TimedRunner::new(),
        }
    }

    pub fn namespace(&self) -> &Namespace {
        self.workload.namespace()
    }

    /// Generate `count` records and time a write pass on each backend.
    ///
    /// Nothing is cleared first; existing test keys are overwritten.
    pub async fn run_write_tests(&self, count: i64) -> BenchResult<WriteTestResults> {
        let records = self.workload.generate(count)?;
        let count = records.len() as u64;

        let timings = self.runner.write_pass(&self.adapters, &records).await?;

        // Bookkeeping stays outside the timed windows
        let manifest = RunManifest::new(count);
        for kind in PASS_ORDER {
            self.adapters
                .get(kind)
                .write_manifest(self.namespace(), &manifest)
                .await
                .map_err(|e| BackendFailure::new(kind, Operation::Write, e))?;
        }

        let results = WriteTestResults::new(count, timings.fast, timings.persistent);
        info!(
            "Write test: {} items, fast {}ms, persistent {}ms",
            count,
            results.fast().write_time_ms(),
            results.persistent().write_time_ms()
        );
        Ok(results)
    }

    /// Time a read pass over the key set of the last write run.
    ///
    /// Without a prior run the key set is empty and the result reports zero
    /// items rather than failing.
    pub async fn run_read_tests(&self) -> BenchResult<ReadTestResults> {
        let existence = self.check_data_exists().await?;
        let count = existence.count.unwrap_or(0);
        let keys = self.workload.expected_keys(count)?;

        let timings = self.runner.read_pass(&self.adapters, &keys).await?;

        let results = ReadTestResults::new(keys.len() as u64, timings.fast, timings.persistent);
        info!(
            "Read test: {} items, fast {}ms, persistent {}ms",
            results.data_count(),
            results.fast().read_time_ms(),
            results.persistent().read_time_ms()
        );
        Ok(results)
    }

    /// Delete all namespaced data from both backends
    pub async fn clear_all_test_data(&self) -> BenchResult<()> {
        probe::clear_all(&self.adapters, self.namespace()).await?;
        info!("Cleared test data under {}", self.namespace());
        Ok(())
    }

    /// Report whether a previous write run's data is still present
    pub async fn check_data_exists(&self) -> BenchResult<ExistenceInfo> {
        probe::check_data_exists(&self.adapters, self.namespace()).await
    }
}

pub use crate::bench::probe::ExistenceInfo;
pub use crate::bench::results::{ReadTestResults, WriteTestResults};
pub use crate::core::backend::BackendKind;
pub use crate::core::config::BenchConfig;
pub use crate::core::errors::{BenchError, BenchResult, StoreError};
pub use crate::core::key::Namespace;

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tempfile::{tempdir, TempDir};

    use crate::bench::adapter::ReadOutcome;
    use crate::core::errors::Result;
    use crate::core::key::Key;
    use crate::core::store::Store;
    use crate::core::workload::Record;

    /// A backend whose every call fails
    struct Unreachable(BackendKind);

    #[async_trait]
    impl StoreAdapter for Unreachable {
        fn kind(&self) -> BackendKind {
            self.0
        }

        async fn write_all(&self, _: &[Record]) -> Result<()> {
            Err(StoreError::Unavailable("backend unreachable".to_string()))
        }

        async fn read_all(&self, _: &[Key]) -> Result<ReadOutcome> {
            Err(StoreError::Unavailable("backend unreachable".to_string()))
        }

        async fn write_manifest(&self, _: &Namespace, _: &RunManifest) -> Result<()> {
            Err(StoreError::Unavailable("backend unreachable".to_string()))
        }

        async fn read_manifest(&self, _: &Namespace) -> Result<Option<RunManifest>> {
            Err(StoreError::Unavailable("backend unreachable".to_string()))
        }

        async fn clear_namespace(&self, _: &Namespace) -> Result<usize> {
            Err(StoreError::Unavailable("backend unreachable".to_string()))
        }
    }

    async fn open_bench() -> (StoreBench, TempDir) {
        let dir = tempdir().unwrap();
        let config = BenchConfig::new(dir.path()).with_sync_writes(false);
        let bench = StoreBench::open(&config).await.unwrap();
        (bench, dir)
    }

    fn assert_valid_time(ms: f64) {
        assert!(ms.is_finite() && ms >= 0.0, "bad timing: {}", ms);
    }

    #[tokio::test]
    async fn test_write_100_items() {
        let (bench, _dir) = open_bench().await;

        let results = bench.run_write_tests(100).await.unwrap();

        assert_eq!(results.data_count(), 100);
        assert_valid_time(results.fast().write_time_ms());
        assert_valid_time(results.persistent().write_time_ms());
    }

    #[tokio::test]
    async fn test_write_zero_items() {
        let (bench, _dir) = open_bench().await;

        let results = bench.run_write_tests(0).await.unwrap();

        assert_eq!(results.data_count(), 0);
        assert_valid_time(results.fast().write_time_ms());
        assert_valid_time(results.persistent().write_time_ms());
    }

    #[tokio::test]
    async fn test_write_rejects_negative_count() {
        let (bench, _dir) = open_bench().await;

        assert!(matches!(
            bench.run_write_tests(-5).await,
            Err(BenchError::InvalidInput(_))
        ));
        assert!(!bench.check_data_exists().await.unwrap().exists);
    }

    #[tokio::test]
    async fn test_data_exists_after_write() {
        let (bench, _dir) = open_bench().await;

        bench.run_write_tests(25).await.unwrap();
        let info = bench.check_data_exists().await.unwrap();

        assert!(info.exists);
        assert_eq!(info.count, Some(25));
        assert!(info.written_at.is_some());
    }

    #[tokio::test]
    async fn test_write_then_read_1000_items() {
        let (bench, _dir) = open_bench().await;

        bench.run_write_tests(1000).await.unwrap();
        let results = bench.run_read_tests().await.unwrap();

        assert_eq!(results.data_count(), 1000);
        assert_valid_time(results.fast().read_time_ms());
        assert_valid_time(results.persistent().read_time_ms());
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let (bench, _dir) = open_bench().await;

        bench.run_write_tests(50).await.unwrap();

        bench.clear_all_test_data().await.unwrap();
        assert!(!bench.check_data_exists().await.unwrap().exists);

        bench.clear_all_test_data().await.unwrap();
        assert!(!bench.check_data_exists().await.unwrap().exists);
    }

    #[tokio::test]
    async fn test_read_without_data_reports_zero_items() {
        let (bench, _dir) = open_bench().await;

        bench.clear_all_test_data().await.unwrap();
        let results = bench.run_read_tests().await.unwrap();

        assert_eq!(results.data_count(), 0);
    }

    #[tokio::test]
    async fn test_data_survives_reopen() {
        let dir = tempdir().unwrap();
        let config = BenchConfig::new(dir.path()).with_sync_writes(false);

        {
            let bench = StoreBench::open(&config).await.unwrap();
            bench.run_write_tests(40).await.unwrap();
        }

        let bench = StoreBench::open(&config).await.unwrap();
        let info = bench.check_data_exists().await.unwrap();
        assert_eq!(info.count, Some(40));

        let results = bench.run_read_tests().await.unwrap();
        assert_eq!(results.data_count(), 40);
    }

    #[tokio::test]
    async fn test_namespaces_are_isolated() {
        let dir = tempdir().unwrap();
        let store = Arc::new(MemoryStore::new());
        let persistent = PersistentStore::open(dir.path(), false).await.unwrap();

        let bench_a = StoreBench::with_adapters(
            Namespace::new("run-a").unwrap(),
            Arc::new(FastAdapter::new(store.clone())),
            Arc::new(PersistentAdapter::new(persistent.clone())),
        );
        let bench_b = StoreBench::with_adapters(
            Namespace::new("run-b").unwrap(),
            Arc::new(FastAdapter::new(store.clone())),
            Arc::new(PersistentAdapter::new(persistent)),
        );

        bench_a.run_write_tests(10).await.unwrap();
        bench_b.run_write_tests(20).await.unwrap();
        bench_a.clear_all_test_data().await.unwrap();

        assert!(!bench_a.check_data_exists().await.unwrap().exists);
        assert_eq!(bench_b.check_data_exists().await.unwrap().count, Some(20));
    }

    #[tokio::test]
    async fn test_exists_falls_back_to_fast_manifest() {
        let dir = tempdir().unwrap();
        let namespace = Namespace::default();
        let fast = FastAdapter::new(Arc::new(MemoryStore::new()));
        fast.write_manifest(&namespace, &RunManifest::new(7)).await.unwrap();

        let persistent = PersistentStore::open(dir.path(), false).await.unwrap();
        let bench = StoreBench::with_adapters(
            namespace,
            Arc::new(fast),
            Arc::new(PersistentAdapter::new(persistent)),
        );

        let info = bench.check_data_exists().await.unwrap();
        assert!(info.exists);
        assert_eq!(info.count, Some(7));
    }

    #[tokio::test]
    async fn test_exists_when_persistent_is_unreachable() {
        let namespace = Namespace::default();
        let fast = FastAdapter::new(Arc::new(MemoryStore::new()));
        fast.write_manifest(&namespace, &RunManifest::new(7)).await.unwrap();

        let bench = StoreBench::with_adapters(
            namespace,
            Arc::new(fast),
            Arc::new(Unreachable(BackendKind::Persistent)),
        );

        let info = bench.check_data_exists().await.unwrap();
        assert_eq!(info.count, Some(7));
    }

    #[tokio::test]
    async fn test_exists_fails_when_no_backend_has_an_answer() {
        let bench = StoreBench::with_adapters(
            Namespace::default(),
            Arc::new(FastAdapter::new(Arc::new(MemoryStore::new()))),
            Arc::new(Unreachable(BackendKind::Persistent)),
        );

        match bench.check_data_exists().await {
            Err(BenchError::Backend(failure)) => {
                assert_eq!(failure.backend, BackendKind::Persistent);
                assert_eq!(failure.operation, Operation::Probe);
            }
            other => panic!("expected a probe failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_write_fails_when_a_backend_is_unreachable() {
        let bench = StoreBench::with_adapters(
            Namespace::default(),
            Arc::new(FastAdapter::new(Arc::new(MemoryStore::new()))),
            Arc::new(Unreachable(BackendKind::Persistent)),
        );

        let err = bench.run_write_tests(10).await.unwrap_err();

        assert!(matches!(err, BenchError::Backend(_)));
        assert_eq!(err.failed_backends(), vec![BackendKind::Persistent]);
    }

    #[tokio::test]
    async fn test_clear_reaches_the_healthy_backend() {
        let fast_store = Arc::new(MemoryStore::new());
        let namespace = Namespace::default();
        let fast = FastAdapter::new(fast_store.clone());
        fast.write_all(&Workload::new(namespace.clone()).generate(10).unwrap())
            .await
            .unwrap();
        fast.write_manifest(&namespace, &RunManifest::new(10)).await.unwrap();

        let bench = StoreBench::with_adapters(
            namespace.clone(),
            Arc::new(fast),
            Arc::new(Unreachable(BackendKind::Persistent)),
        );

        let err = bench.clear_all_test_data().await.unwrap_err();

        assert!(matches!(err, BenchError::Clear(_)));
        assert_eq!(err.failed_backends(), vec![BackendKind::Persistent]);
        assert_eq!(fast_store.count_prefix(&namespace.prefix()).unwrap(), 0);
    }

    #[tokio::test]
    async fn test_clear_attempts_persistent_after_fast_failure() {
        let dir = tempdir().unwrap();
        let persistent = PersistentStore::open(dir.path(), false).await.unwrap();
        let namespace = Namespace::default();
        persistent
            .set(namespace.item(0).to_string(), vec![1])
            .await
            .unwrap();

        let bench = StoreBench::with_adapters(
            namespace.clone(),
            Arc::new(Unreachable(BackendKind::Fast)),
            Arc::new(PersistentAdapter::new(persistent.clone())),
        );

        let err = bench.clear_all_test_data().await.unwrap_err();

        assert_eq!(err.failed_backends(), vec![BackendKind::Fast]);
        assert_eq!(persistent.count_prefix(namespace.prefix()).await.unwrap(), 0);
    }
}
