//! Run command - send the request and print the response.

use colored::Colorize;
use std::sync::Arc;
use tracing::warn;

use super::{RequestArgs, build_manager};
use crate::error::CliResult;

/// Send the request. Ctrl-C cancels it.
///
/// Returns whether the response status was 2xx.
pub async fn run(args: RequestArgs, quiet: bool) -> CliResult<bool> {
    let manager = Arc::new(build_manager(&args)?);

    let canceller = Arc::clone(&manager);
    ctrlc::set_handler(move || {
        warn!("Interrupted, cancelling request");
        canceller.cancel();
    })?;

    let response = manager.execute().await?;

    if !quiet {
        let status = response.status();
        let line = format!("{} {}", manager.method(), status);
        if status.is_success() {
            eprintln!("{}", line.green().bold());
        } else {
            eprintln!("{}", line.red().bold());
        }
    }
    println!("{}", response.text());

    Ok(response.is_success())
}
