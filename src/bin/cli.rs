// src/bin/cli.rs
use clap::Parser;
use imdb_scrape::cli::{self, Cli};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    cli::run(Cli::parse()).await
}
