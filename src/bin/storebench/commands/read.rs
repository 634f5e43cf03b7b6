// src/bin/storebench/commands/read.rs
use anyhow::Result;
use log::debug;
use crate::context::Context;

/// Run a read test over the items of the last write run
pub fn execute(context: &mut Context) -> Result<()> {
    let _run = context.begin_run()?;

    let existence = context.runtime().block_on(async {
        context.bench().check_data_exists().await
    })?;

    if !existence.exists {
        println!("{}", context.formatter().format_info("No data found. Run `write` first to generate test data."));
        return Ok(());
    }

    let results = context.runtime().block_on(async {
        context.bench().run_read_tests().await
    })?;
    debug!("Read results: {:?}", results);

    let formatted = context.formatter().format_read_results(&results)?;
    println!("{}", formatted);

    Ok(())
}
