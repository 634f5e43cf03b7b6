//! Error types for storebench
//!
//! `StoreError` is what a storage engine reports. `BenchError` is what the
//! harness entry points return: a bad argument, or a whole pass that failed
//! on one backend.

use std::fmt;
use thiserror::Error;

use crate::core::backend::BackendKind;
use crate::core::key::KeyError;

/// Errors raised by the storage engines themselves
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Sled error: {0}")]
    Sled(#[from] sled::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for storage operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// The harness operation a backend was performing when it failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Open,
    Write,
    Read,
    Probe,
    Clear,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Open => "open",
            Operation::Write => "write",
            Operation::Read => "read",
            Operation::Probe => "probe",
            Operation::Clear => "clear",
        };
        f.write_str(name)
    }
}

/// One backend's whole pass failed
#[derive(Error, Debug)]
#[error("{backend} backend failed during {operation}: {source}")]
pub struct BackendFailure {
    pub backend: BackendKind,
    pub operation: Operation,
    #[source]
    pub source: StoreError,
}

impl BackendFailure {
    pub fn new(backend: BackendKind, operation: Operation, source: StoreError) -> Self {
        BackendFailure { backend, operation, source }
    }
}

/// Errors returned by the benchmark entry points
#[derive(Error, Debug)]
pub enum BenchError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Backend(#[from] BackendFailure),

    #[error("Clear failed on {}", describe_failures(.0))]
    Clear(Vec<BackendFailure>),

    #[error("Key error: {0}")]
    Key(#[from] KeyError),
}

impl BenchError {
    /// Backends named by this error, in the order they failed
    pub fn failed_backends(&self) -> Vec<BackendKind> {
        match self {
            BenchError::Backend(failure) => vec![failure.backend],
            BenchError::Clear(failures) => failures.iter().map(|f| f.backend).collect(),
            _ => Vec::new(),
        }
    }
}

fn describe_failures(failures: &[BackendFailure]) -> String {
    failures
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for harness operations
pub type BenchResult<T> = std::result::Result<T, BenchError>;
