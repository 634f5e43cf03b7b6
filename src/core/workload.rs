//! Workload generation
//!
//! A workload is a pure function of the item count and the namespace: the
//! read test rebuilds the exact key set a previous write produced without
//! that set ever being stored.

use crate::core::errors::{BenchError, BenchResult};
use crate::core::key::{Key, Namespace};
use crate::core::payload::Payload;

/// Largest item count a single run accepts
pub const MAX_ITEMS: u64 = 1_000_000;

/// One generated key/value pair
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub key: Key,
    pub value: Payload,
}

/// Deterministic record generator for one namespace
#[derive(Debug, Clone, Default)]
pub struct Workload {
    namespace: Namespace,
}

impl Workload {
    pub fn new(namespace: Namespace) -> Self {
        Workload { namespace }
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Generate `n` records
    pub fn generate(&self, n: i64) -> BenchResult<Vec<Record>> {
        let n = validate_count(n)?;

        Ok((0..n)
            .map(|i| Record {
                key: self.namespace.item(i),
                value: Payload::for_index(i),
            })
            .collect())
    }

    /// Keys `generate(n)` would produce, without building the values
    pub fn expected_keys(&self, n: u64) -> BenchResult<Vec<Key>> {
        let n = validate_count(i64::try_from(n).unwrap_or(i64::MAX))?;
        Ok((0..n).map(|i| self.namespace.item(i)).collect())
    }
}

fn validate_count(n: i64) -> BenchResult<u64> {
    if n < 0 {
        return Err(BenchError::InvalidInput(format!(
            "item count must not be negative, got {}",
            n
        )));
    }

    let n = n as u64;
    if n > MAX_ITEMS {
        return Err(BenchError::InvalidInput(format!(
            "item count {} exceeds the maximum of {}",
            n, MAX_ITEMS
        )));
    }

    Ok(n)
}

/// Parse an item count such as "500", "1K", "5k" or "10_000"
pub fn parse_count(input: &str) -> BenchResult<i64> {
    let cleaned: String = input.trim().chars().filter(|c| *c != '_').collect();
    let invalid = || BenchError::InvalidInput(format!("not an item count: {:?}", input));

    let (digits, multiplier) = match cleaned.chars().last() {
        Some('k') | Some('K') => (&cleaned[..cleaned.len() - 1], 1_000),
        Some('m') | Some('M') => (&cleaned[..cleaned.len() - 1], 1_000_000),
        Some(_) => (cleaned.as_str(), 1),
        None => return Err(invalid()),
    };

    let value = digits.parse::<i64>().map_err(|_| invalid())?;
    let count = value.checked_mul(multiplier).ok_or_else(invalid)?;

    validate_count(count)?;
    Ok(count)
}
