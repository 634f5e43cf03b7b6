// src/bin/storebench/context.rs
use std::path::PathBuf;
use anyhow::{Result, anyhow};
use tokio::runtime::Runtime;
use tokio::sync::{Semaphore, SemaphorePermit};

use storebench::{BenchConfig, Namespace, StoreBench};
use storebench::core::workload::parse_count;

use crate::formatters::{OutputFormat, Formatter};
use crate::formatters::text::TextFormatter;
use crate::formatters::json::JsonFormatter;
use crate::formatters::table::TableFormatter;
use crate::utils::error::CliError;

const HISTORY_FILE: &str = "history.txt";

/// Single permit that admits one test run at a time
pub struct RunSlot {
    permits: Semaphore,
}

impl RunSlot {
    pub fn new() -> Self {
        RunSlot {
            permits: Semaphore::new(1),
        }
    }

    /// Claim the slot until the returned permit is dropped
    pub fn begin(&self) -> Result<SemaphorePermit<'_>, CliError> {
        self.permits.try_acquire().map_err(|_| CliError::RunInProgress)
    }
}

/// Options the session is opened with
pub struct SessionOptions {
    pub data_dir: PathBuf,
    pub namespace: String,
    pub sync_writes: bool,
    pub snapshot_fast_store: bool,
    pub verbosity: u8,
    pub format: OutputFormat,
}

/// Execution context of the CLI
pub struct Context {
    /// Benchmark harness over both stores
    bench: StoreBench,

    /// Directory holding both stores
    data_dir: PathBuf,

    /// Output format
    format: OutputFormat,

    /// Verbosity level
    verbosity: u8,

    /// Current formatter
    formatter: Box<dyn Formatter>,

    /// Item count used by `write` when none is given
    selected_count: i64,

    /// Held while a test is running
    run_slot: RunSlot,

    /// Tokio runtime for the async harness calls
    runtime: Runtime,
}

fn make_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new()),
        OutputFormat::Json => Box::new(JsonFormatter::new()),
        OutputFormat::Table => Box::new(TableFormatter::new()),
    }
}

impl Context {
    /// Create a context and open both stores
    pub fn new(options: SessionOptions) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| anyhow!("Failed to create Tokio runtime: {}", e))?;

        let config = BenchConfig::new(&options.data_dir)
            .with_namespace(Namespace::new(options.namespace)?)
            .with_sync_writes(options.sync_writes)
            .with_fast_snapshot(options.snapshot_fast_store);

        let bench = runtime.block_on(StoreBench::open(&config))?;

        Ok(Context {
            bench,
            data_dir: options.data_dir,
            format: options.format,
            verbosity: options.verbosity,
            formatter: make_formatter(options.format),
            selected_count: parse_count("1K")?,
            run_slot: RunSlot::new(),
            runtime,
        })
    }

    /// The benchmark harness
    pub fn bench(&self) -> &StoreBench {
        &self.bench
    }

    /// Claim the run slot; fails if a test is already in flight
    pub fn begin_run(&self) -> Result<SemaphorePermit<'_>, CliError> {
        self.run_slot.begin()
    }

    /// Get the current formatter
    pub fn formatter(&self) -> &dyn Formatter {
        self.formatter.as_ref()
    }

    /// Set the output format
    pub fn set_format(&mut self, format: OutputFormat) {
        if format != self.format {
            self.format = format;
            self.formatter = make_formatter(format);
        }
    }

    pub fn selected_count(&self) -> i64 {
        self.selected_count
    }

    pub fn set_selected_count(&mut self, count: i64) {
        self.selected_count = count;
    }

    pub fn verbosity(&self) -> u8 {
        self.verbosity
    }

    /// Where the REPL keeps its history
    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join(HISTORY_FILE)
    }

    /// Get the Tokio runtime
    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_slot_refuses_a_second_run() {
        let slot = RunSlot::new();

        let running = slot.begin().unwrap();
        assert!(matches!(slot.begin(), Err(CliError::RunInProgress)));

        drop(running);
        assert!(slot.begin().is_ok());
    }
}
