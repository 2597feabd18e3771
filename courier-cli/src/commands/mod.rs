//! CLI commands.

pub mod check;
pub mod run;

use clap::Args;
use courier_client::{RequestManager, Value};
use std::time::Duration;
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Arguments shared by every command that builds a request.
#[derive(Args, Debug, Clone)]
pub struct RequestArgs {
    /// Request file (.json or .toml) or a literal JSON string
    pub config: String,

    /// Set a header (repeatable)
    #[arg(short = 'H', long = "header", value_name = "NAME:VALUE")]
    pub headers: Vec<String>,

    /// Set a body field (repeatable). VALUE is parsed as JSON when possible
    #[arg(short = 's', long = "set", value_name = "PATH=VALUE")]
    pub sets: Vec<String>,

    /// Override the configured timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

/// Load the configuration and apply header and body overrides in order.
pub fn build_manager(args: &RequestArgs) -> CliResult<RequestManager> {
    let manager = RequestManager::from_source(&args.config)?;

    for raw in &args.headers {
        let (name, value) = parse_header(raw)?;
        debug!(name, "Applying header override");
        manager.set_header(name, value);
    }

    for raw in &args.sets {
        let (path, value) = parse_assignment(raw)?;
        manager.set_body(path, value)?;
    }

    if let Some(seconds) = args.timeout {
        if seconds == 0 {
            return Err(CliError::InvalidArgument("--timeout must be greater than zero".into()));
        }
        manager.set_timeout(Some(Duration::from_secs(seconds)));
    }

    Ok(manager)
}

/// Split `Name: value`.
pub fn parse_header(raw: &str) -> CliResult<(&str, &str)> {
    match raw.split_once(':') {
        Some((name, value)) if !name.trim().is_empty() => Ok((name.trim(), value.trim())),
        _ => Err(CliError::InvalidArgument(format!(
            "header must look like NAME:VALUE, got {:?}",
            raw
        ))),
    }
}

/// Split `path=value`, reading the value as JSON when it parses.
pub fn parse_assignment(raw: &str) -> CliResult<(&str, Value)> {
    let (path, text) = raw.split_once('=').ok_or_else(|| {
        CliError::InvalidArgument(format!("body field must look like PATH=VALUE, got {:?}", raw))
    })?;

    let value = serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()));
    Ok((path, value))
}
