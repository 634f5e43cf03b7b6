// src/bin/storebench/commands/clear.rs
use std::io::{self, BufRead, Write};
use anyhow::Result;
use log::warn;
use storebench::BenchError;
use crate::context::Context;

fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;

    Ok(matches!(answer.trim(), "y" | "Y" | "yes" | "Yes"))
}

/// Delete all test data from both stores
pub fn execute(context: &mut Context, yes: bool) -> Result<()> {
    if !yes && !confirm(&format!("Delete all test data under `{}` from both stores?", context.bench().namespace()))? {
        println!("{}", context.formatter().format_info("Clear cancelled"));
        return Ok(());
    }

    let _run = context.begin_run()?;

    let outcome = context.runtime().block_on(async {
        context.bench().clear_all_test_data().await
    });

    match outcome {
        Ok(()) => {
            println!("{}", context.formatter().format_success("Cleared test data from both stores"));
            Ok(())
        }
        Err(e @ BenchError::Clear(_)) => {
            let failed: Vec<String> = e.failed_backends().iter().map(|kind| kind.label().to_string()).collect();
            warn!("Clear incomplete: {}", e);
            println!("{}", context.formatter().format_error(&format!("Could not clear: {}", failed.join(", "))));
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}
