//! Courier CLI - send a declaratively configured HTTP request.
//!
//! # Commands
//!
//! - `courier run <config>` - Patch headers/body fields and send the request
//! - `courier check <config>` - Show the negotiated request without sending it

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;

use commands::{RequestArgs, check, run};

/// Courier - declarative HTTP requests with path-addressed body patching
#[derive(Parser)]
#[command(name = "courier")]
#[command(version)]
#[command(about = "Send a configured HTTP request, patching headers and body fields first")]
#[command(long_about = None)]
#[command(propagate_version = true)]
#[command(after_help = "Examples:\n  $ courier run request.json -H 'Authorization: Bearer t' -s data=hello -s items.0=100\n  $ courier check soap.toml -s Body.Amount=250")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress everything except the response body and errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Send the request and print the response body
    #[command(alias = "r")]
    Run(RequestArgs),

    /// Print the prepared request without sending it
    #[command(alias = "c", visible_alias = "dry-run")]
    Check(RequestArgs),
}

fn init_tracing(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    init_tracing(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Run(args) => run::run(args, cli.quiet).await,
        Commands::Check(args) => check::run(args).map(|_| true),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
