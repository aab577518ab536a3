//! NetSuite CLI - Token-Based Authentication client.
//!
//! Provides commands for:
//! - `rest`: REST Record and SuiteQL batches
//! - `restlet`: generic RESTlet batches (get/post/put/delete)
//! - `restlet-call`: RESTlet POST batches
//! - `sign`: print the OAuth `Authorization` header for a request

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{RestArgs, RestletArgs, RestletCallArgs, SignArgs};
use output::Output;

/// NetSuite - Token-Based Authentication client.
#[derive(Parser)]
#[command(name = "netsuite", version, about)]
struct Cli {
    /// Enable info-level logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run REST Record / SuiteQL work items.
    Rest(RestArgs),
    /// Run generic RESTlet work items.
    Restlet(RestletArgs),
    /// Post work items to a RESTlet.
    RestletCall(RestletCallArgs),
    /// Print the Authorization header for a request.
    Sign(SignArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Rest(args) => args.execute(),
        Commands::Restlet(args) => args.execute(),
        Commands::RestletCall(args) => args.execute(),
        Commands::Sign(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
