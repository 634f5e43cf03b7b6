// src/bin/storebench/commands/write.rs
use anyhow::Result;
use log::debug;
use crate::context::Context;

/// Run a write test over `count` generated items
pub fn execute(context: &mut Context, count: i64) -> Result<()> {
    let _run = context.begin_run()?;

    println!("{}", context.formatter().format_info(&format!("Writing {} items to both stores...", count)));

    let results = context.runtime().block_on(async {
        context.bench().run_write_tests(count).await
    })?;
    debug!("Write results: {:?}", results);

    let formatted = context.formatter().format_write_results(&results)?;
    println!("{}", formatted);

    Ok(())
}
