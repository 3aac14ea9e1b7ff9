use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use drone_bazelisk_ecr::Cli;

fn main() -> Result<()> {
    // Initialize tracing based on RUST_LOG env var, defaulting to info
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    cli.execute()
}
