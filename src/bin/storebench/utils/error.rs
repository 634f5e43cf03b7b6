use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("A test is already running")]
    RunInProgress,

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Usage: {0}")]
    Usage(String),
}
