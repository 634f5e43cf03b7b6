use anyhow::Result;
use colored::*;
use storebench::{ExistenceInfo, ReadTestResults, WriteTestResults};
use crate::formatters::Formatter;
use crate::formatters::comparison::Comparison;

/// Card-style terminal output
pub struct TextFormatter {
    colored: bool,
}

impl TextFormatter {
    pub fn new() -> Self {
        TextFormatter {
            colored: true,
        }
    }

    #[cfg(test)]
    pub fn without_colors() -> Self {
        TextFormatter {
            colored: false,
        }
    }

    fn title(&self, title: &str) -> String {
        if self.colored {
            format!("{}", title.bold())
        } else {
            title.to_string()
        }
    }

    fn card(&self, title: &str, count: u64, fast_ms: f64, persistent_ms: f64) -> String {
        let comparison = Comparison::of(fast_ms, persistent_ms);
        let verdict = if self.colored {
            format!("{}", comparison.describe().yellow())
        } else {
            comparison.describe()
        };

        let mut lines = vec![
            self.title(title),
            format!("  Items:            {}", count),
            format!("  Fast store:       {:.3} ms", fast_ms),
            format!("  Persistent store: {:.3} ms", persistent_ms),
        ];
        lines.push(format!("  {}", verdict));
        lines.join("\n")
    }
}

impl Formatter for TextFormatter {
    fn format_write_results(&self, results: &WriteTestResults) -> Result<String> {
        Ok(self.card(
            "Write test",
            results.data_count(),
            results.fast().write_time_ms(),
            results.persistent().write_time_ms(),
        ))
    }

    fn format_read_results(&self, results: &ReadTestResults) -> Result<String> {
        Ok(self.card(
            "Read test",
            results.data_count(),
            results.fast().read_time_ms(),
            results.persistent().read_time_ms(),
        ))
    }

    fn format_existence(&self, info: &ExistenceInfo) -> Result<String> {
        if !info.exists {
            return Ok("No test data present".to_string());
        }

        let mut text = format!("Test data present: {} items", info.count.unwrap_or(0));
        if let Some(written_at) = info.written_at {
            text.push_str(&format!(" (written {})", written_at.format("%Y-%m-%d %H:%M:%S UTC")));
        }
        Ok(text)
    }

    fn format_error(&self, error: &str) -> String {
        if self.colored {
            format!("{}", error.red().bold())
        } else {
            format!("Error: {}", error)
        }
    }

    fn format_info(&self, info: &str) -> String {
        if self.colored {
            format!("{}", info.blue())
        } else {
            format!("Info: {}", info)
        }
    }

    fn format_success(&self, success: &str) -> String {
        if self.colored {
            format!("{}", success.green().bold())
        } else {
            format!("Success: {}", success)
        }
    }
}
