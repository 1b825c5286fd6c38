mod grid;
mod region;
mod render;
mod search;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use grid::GridArgs;
use search::SearchArgs;

#[derive(Debug, Parser)]
#[command(name = "barscan")]
#[command(about = "Sweep a map region for bars with the Kakao Local category search")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the area, center, and grid for a region without searching.
    Grid(GridArgs),
    /// Search every grid cell of a region and list the unique places found.
    Search(SearchArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = barscan_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Grid(args) => grid::run_grid(&config, &args),
        Commands::Search(args) => search::run_search(&config, args).await,
    }
}
