use crate::core::errors::Result;

/// Synchronous key-value contract shared by both storage engines
pub trait Store: Send + Sync {
    /// Insert or overwrite the value at `key`
    fn set(&self, key: &str, value: Vec<u8>) -> Result<()>;

    /// Get the value at `key`, `None` if absent
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Delete every key starting with `prefix`, returning how many went away
    fn remove_prefix(&self, prefix: &str) -> Result<usize>;

    /// Count the keys starting with `prefix`
    fn count_prefix(&self, prefix: &str) -> Result<usize>;

    /// Make previous writes durable
    fn flush(&self) -> Result<()>;
}
