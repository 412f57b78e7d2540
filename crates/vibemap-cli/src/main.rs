//! vibemap command line interface.

mod grid;
mod places;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use vibemap_core::config::load_app_config;

#[derive(Debug, Parser)]
#[command(name = "vibemap")]
#[command(about = "Find food venues nearby and paint the grid notebook")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List venues around an origin, split into near and far buckets
    Near {
        /// Origin latitude in degrees
        #[arg(long)]
        lat: f64,
        /// Origin longitude in degrees
        #[arg(long)]
        lon: f64,
        /// Exact category tag to filter on (case-insensitive)
        #[arg(long)]
        category: Option<String>,
        /// Near-bucket radius in meters (defaults to the configured value)
        #[arg(long)]
        radius: Option<u32>,
    },
    /// Pick one nearby venue at random
    Lucky {
        /// Origin latitude in degrees
        #[arg(long)]
        lat: f64,
        /// Origin longitude in degrees
        #[arg(long)]
        lon: f64,
        /// Exact category tag to filter on (case-insensitive)
        #[arg(long)]
        category: Option<String>,
    },
    /// Inspect and paint the grid notebook
    Grid {
        #[command(subcommand)]
        command: grid::GridCommands,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_app_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    match cli.command {
        Commands::Near {
            lat,
            lon,
            category,
            radius,
        } => places::near(&config, lat, lon, category, radius),
        Commands::Lucky { lat, lon, category } => places::lucky(&config, lat, lon, category),
        Commands::Grid { command } => grid::run(&config, command),
    }
}
