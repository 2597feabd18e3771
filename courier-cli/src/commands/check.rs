//! Check command - show the request that would be sent.

use colored::Colorize;

use super::{RequestArgs, build_manager};
use crate::error::CliResult;

/// Print the prepared request without sending it.
pub fn run(args: RequestArgs) -> CliResult<()> {
    let manager = build_manager(&args)?;
    let request = manager.prepare()?;

    println!("{} {}", request.method().as_str().bright_white().bold(), request.url());
    for (name, value) in request.headers() {
        println!("{}: {}", name.as_str().cyan(), value.to_str().unwrap_or("<binary>"));
    }
    if let Some(timeout) = request.timeout() {
        println!("{} {}s", "timeout:".dimmed(), timeout.as_secs());
    }

    if let Some(body) = request.body() {
        println!();
        match request.body_text() {
            Some(text) => println!("{}", text),
            None => println!("<{} bytes of binary body>", body.len()),
        }
    }

    Ok(())
}
