pub mod backend;
pub mod config;
pub mod errors;
pub mod key;
pub mod payload;
pub mod store;
pub mod workload;


pub use backend::{BackendKind, PASS_ORDER};
pub use config::BenchConfig;
pub use errors::{BackendFailure, BenchError, BenchResult, Operation, Result, StoreError};
pub use key::{Key, KeyError, Namespace};
pub use payload::Payload;
pub use store::Store;
pub use workload::{parse_count, Record, Workload};
