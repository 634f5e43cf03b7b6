//! Timed runner
//!
//! One timed pass is bounded by two readings of a monotonic clock taken
//! immediately around the adapter call. The two backends are always run one
//! after the other in `PASS_ORDER`, never concurrently.

use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::bench::adapter::{AdapterPair, ReadOutcome, StoreAdapter};
use crate::core::backend::{BackendKind, PASS_ORDER};
use crate::core::errors::{BackendFailure, Operation};
use crate::core::key::Key;
use crate::core::workload::Record;

/// A started clock reading
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    started: Instant,
}

impl Stopwatch {
    pub fn start() -> Self {
        Stopwatch { started: Instant::now() }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// Elapsed time of each backend's pass within one test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PassTimings {
    pub fast: Duration,
    pub persistent: Duration,
}

impl PassTimings {
    fn record(&mut self, kind: BackendKind, elapsed: Duration) {
        match kind {
            BackendKind::Fast => self.fast = elapsed,
            BackendKind::Persistent => self.persistent = elapsed,
        }
    }
}

/// Runs timed passes against adapters
#[derive(Debug, Clone, Copy, Default)]
pub struct TimedRunner;

impl TimedRunner {
    pub fn new() -> Self {
        TimedRunner
    }

    /// Time one full write pass against a single adapter
    pub async fn time_write(
        &self,
        adapter: &dyn StoreAdapter,
        records: &[Record],
    ) -> Result<Duration, BackendFailure> {
        let kind = adapter.kind();

        let clock = Stopwatch::start();
        let result = adapter.write_all(records).await;
        let elapsed = clock.elapsed();

        match result {
            Ok(()) => {
                debug!("{} backend wrote {} records in {:?}", kind, records.len(), elapsed);
                Ok(elapsed)
            }
            Err(e) => {
                warn!("{} backend write pass failed after {:?}: {}", kind, elapsed, e);
                Err(BackendFailure::new(kind, Operation::Write, e))
            }
        }
    }

    /// Time one full read pass against a single adapter
    pub async fn time_read(
        &self,
        adapter: &dyn StoreAdapter,
        keys: &[Key],
    ) -> Result<(Duration, ReadOutcome), BackendFailure> {
        let kind = adapter.kind();

        let clock = Stopwatch::start();
        let result = adapter.read_all(keys).await;
        let elapsed = clock.elapsed();

        match result {
            Ok(outcome) => {
                debug!(
                    "{} backend read {} keys in {:?} ({} misses)",
                    kind,
                    keys.len(),
                    elapsed,
                    outcome.misses()
                );
                Ok((elapsed, outcome))
            }
            Err(e) => {
                warn!("{} backend read pass failed after {:?}: {}", kind, elapsed, e);
                Err(BackendFailure::new(kind, Operation::Read, e))
            }
        }
    }

    /// Write pass on both backends; any failure fails the whole test
    pub async fn write_pass(
        &self,
        adapters: &AdapterPair,
        records: &[Record],
    ) -> Result<PassTimings, BackendFailure> {
        let mut timings = PassTimings::default();

        for kind in PASS_ORDER {
            let elapsed = self.time_write(adapters.get(kind), records).await?;
            timings.record(kind, elapsed);
        }

        Ok(timings)
    }

    /// Read pass on both backends; any failure fails the whole test
    pub async fn read_pass(
        &self,
        adapters: &AdapterPair,
        keys: &[Key],
    ) -> Result<PassTimings, BackendFailure> {
        let mut timings = PassTimings::default();

        for kind in PASS_ORDER {
            let (elapsed, outcome) = self.time_read(adapters.get(kind), keys).await?;
            if outcome.misses() > 0 {
                warn!(
                    "{} backend missed {} of {} keys",
                    kind,
                    outcome.misses(),
                    outcome.len()
                );
            }
            timings.record(kind, elapsed);
        }

        Ok(timings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use crate::bench::probe::RunManifest;
    use crate::core::errors::{Result, StoreError};
    use crate::core::key::Namespace;
    use crate::core::workload::Workload;

    /// Records the order adapters are called in and can be told to fail
    struct Recorder {
        kind: BackendKind,
        calls: Arc<Mutex<Vec<BackendKind>>>,
        fail: bool,
    }

    #[async_trait]
    impl StoreAdapter for Recorder {
        fn kind(&self) -> BackendKind {
            self.kind
        }

        async fn write_all(&self, _records: &[Record]) -> Result<()> {
            self.calls.lock().unwrap().push(self.kind);
            if self.fail {
                return Err(StoreError::Unavailable("offline".to_string()));
            }
            Ok(())
        }

        async fn read_all(&self, keys: &[Key]) -> Result<ReadOutcome> {
            self.calls.lock().unwrap().push(self.kind);
            if self.fail {
                return Err(StoreError::Unavailable("offline".to_string()));
            }
            Ok(ReadOutcome { values: vec![None; keys.len()] })
        }

        async fn write_manifest(&self, _: &Namespace, _: &RunManifest) -> Result<()> {
            Ok(())
        }

        async fn read_manifest(&self, _: &Namespace) -> Result<Option<RunManifest>> {
            Ok(None)
        }

        async fn clear_namespace(&self, _: &Namespace) -> Result<usize> {
            Ok(0)
        }
    }

    fn pair(fail_fast: bool, fail_persistent: bool) -> (AdapterPair, Arc<Mutex<Vec<BackendKind>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let fast = Recorder { kind: BackendKind::Fast, calls: calls.clone(), fail: fail_fast };
        let persistent = Recorder {
            kind: BackendKind::Persistent,
            calls: calls.clone(),
            fail: fail_persistent,
        };
        (AdapterPair::new(Arc::new(fast), Arc::new(persistent)), calls)
    }

    #[tokio::test]
    async fn test_passes_run_in_fixed_order() {
        let (adapters, calls) = pair(false, false);
        let runner = TimedRunner::new();
        let records = Workload::default().generate(3).unwrap();

        runner.write_pass(&adapters, &records).await.unwrap();
        runner.read_pass(&adapters, &[]).await.unwrap();

        assert_eq!(
            *calls.lock().unwrap(),
            vec![
                BackendKind::Fast,
                BackendKind::Persistent,
                BackendKind::Fast,
                BackendKind::Persistent
            ]
        );
    }

    #[tokio::test]
    async fn test_failure_names_the_failing_backend() {
        let (adapters, _) = pair(false, true);
        let records = Workload::default().generate(3).unwrap();

        let failure = TimedRunner::new().write_pass(&adapters, &records).await.unwrap_err();

        assert_eq!(failure.backend, BackendKind::Persistent);
        assert_eq!(failure.operation, Operation::Write);
    }

    #[tokio::test]
    async fn test_failed_fast_pass_skips_persistent_pass() {
        let (adapters, calls) = pair(true, false);
        let records = Workload::default().generate(3).unwrap();

        assert!(TimedRunner::new().write_pass(&adapters, &records).await.is_err());
        assert_eq!(*calls.lock().unwrap(), vec![BackendKind::Fast]);
    }

    #[tokio::test]
    async fn test_failed_read_pass_names_the_failing_backend() {
        let (adapters, calls) = pair(false, true);
        let keys = Workload::default().expected_keys(4).unwrap();

        let failure = TimedRunner::new().read_pass(&adapters, &keys).await.unwrap_err();

        assert_eq!(failure.backend, BackendKind::Persistent);
        assert_eq!(failure.operation, Operation::Read);
        assert_eq!(
            *calls.lock().unwrap(),
            vec![BackendKind::Fast, BackendKind::Persistent]
        );
    }
}
