use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use drivefs_cli::Args;

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    if let Err(e) = drivefs_cli::run(args) {
        eprintln!("Error [{}]: {}", e.code(), e);
        std::process::exit(1);
    }
}
