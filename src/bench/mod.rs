//! Benchmark harness
//!
//! Adapters put both storage engines behind one async contract, the runner
//! times passes against them, and the result records carry the timings back
//! to the caller.

pub mod adapter;
pub mod probe;
pub mod results;
pub mod runner;

pub use adapter::{AdapterPair, FastAdapter, PersistentAdapter, ReadOutcome, StoreAdapter};
pub use probe::{ExistenceInfo, RunManifest};
pub use results::{ReadTestResults, ReadTiming, WriteTestResults, WriteTiming};
pub use runner::{PassTimings, Stopwatch, TimedRunner};
