#![deny(missing_docs)]

//! # Schemagen CLI
//!
//! Command Line Interface for the schema resolution core.
//!
//! Supported Commands:
//! - `resolve`: Resolves OpenAPI documents and prints classes and operations as JSON.

use clap::{Parser, Subcommand};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::error::CliResult;

mod error;
mod resolve;

#[derive(Parser, Debug)]
#[clap(author, version, about = "OpenAPI schema resolver")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve documents into classes, properties, types and operation names.
    Resolve(resolve::ResolveArgs),
}

/// Logs go to stderr so stdout stays valid JSON. `RUST_LOG` overrides `warn`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(filter);

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn main() -> CliResult<()> {
    init_tracing();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Resolve(args) => {
            let mut stdout = std::io::stdout().lock();
            resolve::execute(args, &mut stdout)?;
        }
    }

    Ok(())
}
