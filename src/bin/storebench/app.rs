// src/bin/storebench/app.rs
use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;

use storebench::core::config::DEFAULT_DATA_DIR;
use storebench::core::key::DEFAULT_NAMESPACE;
use storebench::core::workload::parse_count;

use crate::commands;
use crate::context::{Context, SessionOptions};
use crate::formatters::OutputFormat;
use crate::repl::Repl;

#[derive(Parser)]
#[command(name = "storebench")]
#[command(about = "Compare write/read latency of an in-process store and an on-disk store", long_about = None)]
struct Cli {
    /// Verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Output format (text, json, table)
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Directory holding both stores
    #[arg(short, long, default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Namespace test keys are written under
    #[arg(short, long, default_value = DEFAULT_NAMESPACE)]
    namespace: String,

    /// Do not flush the persistent store after every write
    #[arg(long)]
    no_sync: bool,

    /// Keep the fast store in memory only
    #[arg(long)]
    no_snapshot: bool,

    /// Enter the interactive shell (after running COMMAND, if any)
    #[arg(short, long)]
    interactive: bool,

    /// Command to run
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write generated items to both stores and time it
    Write {
        /// Number of items (100, 500, 1K, 5K, ...)
        #[arg(short, long, default_value = "1K", value_parser = parse_count_arg)]
        count: i64,
    },

    /// Read back the items of the last write run and time it
    Read,

    /// Delete all test data from both stores
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show whether test data from a previous write run is present
    Status,
}

fn parse_count_arg(s: &str) -> std::result::Result<i64, String> {
    parse_count(s).map_err(|e| e.to_string())
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);
    info!("Starting storebench");

    let options = SessionOptions {
        data_dir: cli.data_dir,
        namespace: cli.namespace,
        sync_writes: !cli.no_sync,
        snapshot_fast_store: !cli.no_snapshot,
        verbosity: cli.verbose,
        format: cli.format,
    };
    let mut context = Context::new(options)?;

    let ran_command = cli.command.is_some();
    match cli.command {
        Some(Commands::Write { count }) => commands::write::execute(&mut context, count)?,
        Some(Commands::Read) => commands::read::execute(&mut context)?,
        Some(Commands::Clear { yes }) => commands::clear::execute(&mut context, yes)?,
        Some(Commands::Status) => commands::status::execute(&mut context)?,
        None => {}
    }

    if !ran_command || cli.interactive {
        let mut repl = Repl::new(context)?;
        repl.run()?;
    }

    Ok(())
}
