//! Synthetic payload stored under every generated key
//!
//! The shape is fixed and every field is a function of the item index, so
//! two runs with the same count write byte-identical values.

use serde::{Serialize, Deserialize};

use crate::core::errors::{Result, StoreError};

/// Seconds since the Unix epoch of the first generated record (2024-01-01)
const BASE_TIMESTAMP: i64 = 1_704_067_200;

const NAMES: [&str; 8] = [
    "alice", "bob", "carol", "dave", "erin", "frank", "grace", "heidi",
];

/// The value written for one generated record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payload {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub age: u32,
    pub active: bool,
    pub score: f64,
    pub created_at: i64,
}

impl Payload {
    /// Build the payload for item `index`
    pub fn for_index(index: u64) -> Self {
        let name = format!("{}{}", NAMES[(index % NAMES.len() as u64) as usize], index);

        Payload {
            id: index,
            email: format!("{}@example.com", name),
            name,
            age: 18 + (index % 60) as u32,
            active: index % 3 != 0,
            score: (index % 1000) as f64 / 10.0,
            created_at: BASE_TIMESTAMP + index as i64,
        }
    }

    /// Encode as the JSON bytes both stores hold
    pub fn encode(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| StoreError::SerializationError(e.to_string()))
    }

    /// Decode from stored JSON bytes
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| StoreError::DeserializationError(e.to_string()))
    }
}
