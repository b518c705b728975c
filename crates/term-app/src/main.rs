//! Binary entry point: CLI parsing, logging setup, and handoff to the run
//! loop (`app::run`). Structured logging via `tracing_subscriber::fmt` with
//! an `EnvFilter` seeded from a default directive, overridable by `RUST_LOG`.

mod app;
mod cli;

use tracing_subscriber::EnvFilter;

fn main() {
    let args = cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("term=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("term v{} starting", env!("CARGO_PKG_VERSION"));

    if let Err(e) = app::run(args) {
        eprintln!("term: {e}");
        std::process::exit(1);
    }
}
