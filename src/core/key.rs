//! Namespaced keys
//!
//! Every key the harness writes lives under a namespace prefix so the test
//! data can be found and purged without touching anything else stored in the
//! same backend. Item indices are zero-padded so that byte order, and hence
//! iteration order in both stores, matches generation order.

use std::fmt;
use thiserror::Error;
use serde::{Serialize, Deserialize};

/// Namespace used when none is configured
pub const DEFAULT_NAMESPACE: &str = "storebench";

/// Width of the zero-padded item index
pub const INDEX_WIDTH: usize = 10;

const SEPARATOR: char = ':';
const ITEM_TAG: &str = "item";
const META_TAG: &str = "meta";
const MANIFEST_NAME: &str = "manifest";

/// Errors that can occur when building keys
#[derive(Error, Debug, PartialEq)]
pub enum KeyError {
    #[error("Invalid namespace: {0}")]
    InvalidNamespace(String),
    #[error("Empty namespace")]
    EmptyNamespace,
}

/// A validated namespace (e.g. "storebench")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Namespace(String);

impl Namespace {
    /// Create a namespace, rejecting anything that could collide with the separator
    pub fn new<S: Into<String>>(name: S) -> Result<Self, KeyError> {
        let name = name.into();

        if name.is_empty() {
            return Err(KeyError::EmptyNamespace);
        }

        let valid = name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(KeyError::InvalidNamespace(name));
        }

        Ok(Namespace(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Prefix shared by every key in this namespace, separator included
    pub fn prefix(&self) -> String {
        format!("{}{}", self.0, SEPARATOR)
    }

    /// Key of the generated item at `index`
    pub fn item(&self, index: u64) -> Key {
        Key {
            raw: format!(
                "{ns}{sep}{tag}{sep}{index:0width$}",
                ns = self.0,
                sep = SEPARATOR,
                tag = ITEM_TAG,
                index = index,
                width = INDEX_WIDTH,
            ),
        }
    }

    /// Key of the run manifest sentinel
    pub fn manifest(&self) -> Key {
        Key {
            raw: format!("{}{sep}{}{sep}{}", self.0, META_TAG, MANIFEST_NAME, sep = SEPARATOR),
        }
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Namespace(DEFAULT_NAMESPACE.to_string())
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A namespaced key (e.g. "storebench:item:0000000042")
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    raw: String,
}

impl Key {
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_key_format() {
        let ns = Namespace::default();
        assert_eq!(ns.item(42).as_str(), "storebench:item:0000000042");
        assert_eq!(ns.manifest().as_str(), "storebench:meta:manifest");
    }

    #[test]
    fn test_item_keys_sort_in_generation_order() {
        let ns = Namespace::default();
        let mut keys: Vec<String> = [1000, 9, 10, 99, 0]
            .iter()
            .map(|i| ns.item(*i).as_str().to_string())
            .collect();
        keys.sort();

        let expected: Vec<String> = [0, 9, 10, 99, 1000]
            .iter()
            .map(|i| ns.item(*i).as_str().to_string())
            .collect();
        assert_eq!(keys, expected);
    }

    #[test]
    fn test_keys_stay_under_their_namespace() {
        let short = Namespace::new("runs").unwrap();
        let long = Namespace::new("runs-a").unwrap();

        assert!(long.item(7).as_str().starts_with(&long.prefix()));
        assert!(long.manifest().as_str().starts_with(&long.prefix()));
        assert!(!long.item(7).as_str().starts_with(&short.prefix()));
    }

    #[test]
    fn test_namespace_validation() {
        assert_eq!(Namespace::new(""), Err(KeyError::EmptyNamespace));
        assert!(matches!(Namespace::new("a:b"), Err(KeyError::InvalidNamespace(_))));
        assert!(matches!(Namespace::new("a b"), Err(KeyError::InvalidNamespace(_))));
        assert!(Namespace::new("bench_2-x").is_ok());
    }
}
