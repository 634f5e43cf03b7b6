mod app;
mod context;
mod commands;
mod formatters;
mod repl;
mod utils;

use anyhow::Result;
use log::info;

fn main() -> Result<()> {
    let result = app::run();

    info!("storebench finished");

    result
}
