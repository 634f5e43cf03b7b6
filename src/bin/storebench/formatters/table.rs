use anyhow::Result;
use colored::*;
use prettytable::{Table, Row, Cell};
use storebench::{BackendKind, ExistenceInfo, ReadTestResults, WriteTestResults};
use crate::formatters::Formatter;
use crate::formatters::comparison::Comparison;

/// One row per store
pub struct TableFormatter {
    colored: bool,
}

impl TableFormatter {
    pub fn new() -> Self {
        TableFormatter {
            colored: true,
        }
    }

    #[cfg(test)]
    pub fn without_colors() -> Self {
        TableFormatter {
            colored: false,
        }
    }

    fn timing_table(&self, column: &str, count: u64, fast_ms: f64, persistent_ms: f64) -> String {
        let comparison = Comparison::of(fast_ms, persistent_ms);
        let mut table = Table::new();

        table.add_row(Row::new(vec![
            Cell::new("Store"),
            Cell::new("Items"),
            Cell::new(column),
        ]));

        for (kind, ms) in [(BackendKind::Fast, fast_ms), (BackendKind::Persistent, persistent_ms)] {
            let mut label = kind.label().to_string();
            if comparison.winner() == Some(kind) {
                label.push_str(" *");
            }
            table.add_row(Row::new(vec![
                Cell::new(&label),
                Cell::new(&count.to_string()),
                Cell::new(&format!("{:.3}", ms)),
            ]));
        }

        format!("{}{}", table, comparison.describe())
    }
}

impl Formatter for TableFormatter {
    fn format_write_results(&self, results: &WriteTestResults) -> Result<String> {
        Ok(self.timing_table(
            "Write time (ms)",
            results.data_count(),
            results.fast().write_time_ms(),
            results.persistent().write_time_ms(),
        ))
    }

    fn format_read_results(&self, results: &ReadTestResults) -> Result<String> {
        Ok(self.timing_table(
            "Read time (ms)",
            results.data_count(),
            results.fast().read_time_ms(),
            results.persistent().read_time_ms(),
        ))
    }

    fn format_existence(&self, info: &ExistenceInfo) -> Result<String> {
        let mut table = Table::new();

        table.add_row(Row::new(vec![Cell::new("Exists"), Cell::new(&info.exists.to_string())]));
        if let Some(count) = info.count {
            table.add_row(Row::new(vec![Cell::new("Items"), Cell::new(&count.to_string())]));
        }
        if let Some(written_at) = info.written_at {
            table.add_row(Row::new(vec![Cell::new("Written at"), Cell::new(&written_at.to_rfc3339())]));
        }

        Ok(table.to_string())
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_read_table_marks_winner() {
        let formatter = TableFormatter::without_colors();
        let results = ReadTestResults::new(10, Duration::from_millis(8), Duration::from_millis(2));
        let text = formatter.format_read_results(&results).unwrap();

        assert!(text.contains("Persistent store *"));
        assert!(!text.contains("Fast store *"));
        assert!(text.ends_with("Persistent store is 4.00x faster"));
    }
}
