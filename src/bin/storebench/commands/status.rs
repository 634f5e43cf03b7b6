// src/bin/storebench/commands/status.rs
use anyhow::Result;
use crate::context::Context;

/// Report whether test data from a previous write run is present
pub fn execute(context: &mut Context) -> Result<()> {
    let existence = context.runtime().block_on(async {
        context.bench().check_data_exists().await
    })?;

    let formatted = context.formatter().format_existence(&existence)?;
    println!("{}", formatted);

    Ok(())
}
