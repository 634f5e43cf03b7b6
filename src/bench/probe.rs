//! Existence probe and clear
//!
//! A write run leaves a manifest sentinel next to its records. The probe
//! reads that sentinel instead of scanning keys, and the read test uses the
//! count it carries to rebuild the expected key set.

use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Serialize, Deserialize};

use crate::bench::adapter::AdapterPair;
use crate::core::backend::{BackendKind, PASS_ORDER};
use crate::core::errors::{BackendFailure, BenchError, BenchResult, Operation, Result, StoreError};
use crate::core::key::Namespace;

/// Sentinel written alongside the records of a write run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunManifest {
    /// Number of records the run wrote
    pub count: u64,
    /// When the run finished writing
    pub written_at: DateTime<Utc>,
}

impl RunManifest {
    pub fn new(count: u64) -> Self {
        RunManifest {
            count,
            written_at: Utc::now(),
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| StoreError::SerializationError(e.to_string()))
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| StoreError::DeserializationError(e.to_string()))
    }
}

/// Whether data from a previous write run is still resident
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExistenceInfo {
    pub exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub written_at: Option<DateTime<Utc>>,
}

impl ExistenceInfo {
    pub fn absent() -> Self {
        ExistenceInfo {
            exists: false,
            count: None,
            written_at: None,
        }
    }

    pub fn from_manifest(manifest: RunManifest) -> Self {
        ExistenceInfo {
            exists: true,
            count: Some(manifest.count),
            written_at: Some(manifest.written_at),
        }
    }
}

/// Look for a manifest, persistent backend first since it is the durable one.
///
/// A backend that fails to answer does not stop the search. The first failure
/// is only returned when no backend reports a manifest.
pub async fn check_data_exists(adapters: &AdapterPair, namespace: &Namespace) -> BenchResult<ExistenceInfo> {
    let mut first_failure = None;

    for kind in [BackendKind::Persistent, BackendKind::Fast] {
        match adapters.get(kind).read_manifest(namespace).await {
            Ok(Some(manifest)) => {
                debug!("Found manifest for {} items on the {} backend", manifest.count, kind);
                return Ok(ExistenceInfo::from_manifest(manifest));
            }
            Ok(None) => {}
            Err(e) => {
                warn!("Could not probe the {} backend: {}", kind, e);
                if first_failure.is_none() {
                    first_failure = Some(BackendFailure::new(kind, Operation::Probe, e));
                }
            }
        }
    }

    match first_failure {
        Some(failure) => Err(failure.into()),
        None => Ok(ExistenceInfo::absent()),
    }
}

/// Remove every namespaced key from both backends.
///
/// Each backend is attempted regardless of the other's outcome; failures are
/// reported together once both attempts are done.
pub async fn clear_all(adapters: &AdapterPair, namespace: &Namespace) -> BenchResult<()> {
    let mut failures = Vec::new();

    for kind in PASS_ORDER {
        match adapters.get(kind).clear_namespace(namespace).await {
            Ok(removed) => debug!("Cleared {} keys from the {} backend", removed, kind),
            Err(e) => {
                warn!("Failed to clear the {} backend: {}", kind, e);
                failures.push(BackendFailure::new(kind, Operation::Clear, e));
            }
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(BenchError::Clear(failures))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_encoding() {
        let manifest = RunManifest::new(1000);
        let decoded = RunManifest::decode(&manifest.encode().unwrap()).unwrap();
        assert_eq!(decoded, manifest);

        let json: serde_json::Value = serde_json::from_slice(&manifest.encode().unwrap()).unwrap();
        assert_eq!(json["count"], serde_json::json!(1000));
        assert!(json["writtenAt"].is_string());
    }

    #[test]
    fn test_absent_existence_omits_count() {
        let json = serde_json::to_value(ExistenceInfo::absent()).unwrap();
        assert_eq!(json, serde_json::json!({ "exists": false }));
    }
}
