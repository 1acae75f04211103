//! Quill - a single-key Ethereum signing wallet CLI.
//!
//! Derives or imports one key and signs transactions and messages with it.

mod commands;

use clap::Parser;
use commands::Cli;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(e) = cli.execute() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise `debug` with `--debug` and `warn` without.
fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
