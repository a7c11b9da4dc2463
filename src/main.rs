mod cli;
mod clipboard;
mod config;
mod confirm;
mod error;
mod logging;
mod palette;
mod session;
mod store;
mod template;
mod tui;

use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    let config = config::Config::load()?;
    cli.run(config).await
}
