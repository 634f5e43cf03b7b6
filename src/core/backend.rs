use std::fmt;
use serde::{Serialize, Deserialize};

/// Identifies one of the two storage engines under test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// In-process synchronous store
    Fast,
    /// On-disk store reached through awaited calls
    Persistent,
}

/// Order in which every test runs its passes.
///
/// Fixed for all invocations so neither backend profits from the other
/// warming caches first on some runs and not on others.
pub const PASS_ORDER: [BackendKind; 2] = [BackendKind::Fast, BackendKind::Persistent];

impl BackendKind {
    /// Label used in reports
    pub fn label(&self) -> &'static str {
        match self {
            BackendKind::Fast => "Fast store",
            BackendKind::Persistent => "Persistent store",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Fast => write!(f, "fast"),
            BackendKind::Persistent => write!(f, "persistent"),
        }
    }
}
