//! Error types for the Courier CLI.

use std::fmt;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug)]
pub enum CliError {
    /// IO error (terminal output, etc.)
    Io(std::io::Error),

    /// Request configuration could not be loaded
    Config(String),

    /// Invalid argument
    InvalidArgument(String),

    /// Building or sending the request failed
    Request(courier_client::CourierError),

    /// Command setup error
    Command(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            CliError::Request(e) => write!(f, "Request error: {}", e),
            CliError::Command(msg) => write!(f, "Command error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<courier_client::CourierError> for CliError {
    fn from(e: courier_client::CourierError) -> Self {
        match e {
            courier_client::CourierError::Config(e) => CliError::Config(e.to_string()),
            other => CliError::Request(other),
        }
    }
}

impl From<ctrlc::Error> for CliError {
    fn from(e: ctrlc::Error) -> Self {
        CliError::Command(e.to_string())
    }
}
