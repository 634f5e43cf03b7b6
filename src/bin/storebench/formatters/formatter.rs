use anyhow::Result;
use storebench::{ExistenceInfo, ReadTestResults, WriteTestResults};

/// Renders harness results for the terminal
pub trait Formatter {
    /// Format the outcome of a write test
    fn format_write_results(&self, results: &WriteTestResults) -> Result<String>;

    /// Format the outcome of a read test
    fn format_read_results(&self, results: &ReadTestResults) -> Result<String>;

    /// Format the existence probe
    fn format_existence(&self, info: &ExistenceInfo) -> Result<String>;

    fn format_error(&self, error: &str) -> String;

    fn format_info(&self, info: &str) -> String;

    fn format_success(&self, success: &str) -> String;
}
