use anyhow::Result;
use colored::*;
use serde::Serialize;
use serde_json::json;
use storebench::{ExistenceInfo, ReadTestResults, WriteTestResults};
use crate::formatters::Formatter;

/// Emits the result records as JSON.
///
/// Timings sit under `fast` and `persistent`, not `mmkv` and `asyncStorage`.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        JsonFormatter {
            pretty: true,
        }
    }

    #[cfg(test)]
    pub fn without_pretty() -> Self {
        JsonFormatter {
            pretty: false,
        }
    }

    fn render<T: Serialize>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl Formatter for JsonFormatter {
    fn format_write_results(&self, results: &WriteTestResults) -> Result<String> {
        self.render(results)
    }

    fn format_read_results(&self, results: &ReadTestResults) -> Result<String> {
        self.render(results)
    }

    fn format_existence(&self, info: &ExistenceInfo) -> Result<String> {
        self.render(info)
    }

    fn format_error(&self, error: &str) -> String {
        let json = json!({ "error": error });
        format!("{}", json.to_string().red())
    }

    fn format_info(&self, info: &str) -> String {
        json!({ "info": info }).to_string()
    }

    fn format_success(&self, success: &str) -> String {
        json!({ "success": success }).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_write_results_shape() {
        let formatter = JsonFormatter::without_pretty();
        let results = WriteTestResults::new(3, Duration::from_micros(1_500), Duration::from_millis(9));
        let text = formatter.format_write_results(&results).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["dataCount"], 3);
        assert_eq!(value["fast"]["writeTime"], 1.5);
        assert_eq!(value["persistent"]["writeTime"], 9.0);
    }

    #[test]
    fn test_absent_existence_omits_count() {
        let formatter = JsonFormatter::without_pretty();
        let text = formatter.format_existence(&ExistenceInfo::absent()).unwrap();
        assert_eq!(text, r#"{"exists":false}"#);
    }
}
