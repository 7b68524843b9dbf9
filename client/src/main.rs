use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

mod cli;
mod commands;
mod contracts;
mod errors;
mod ui;
mod wallet;

#[tokio::main]
async fn main() -> Result<()> {
    // stdout belongs to the panels
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    commands::run(cli).await
}
