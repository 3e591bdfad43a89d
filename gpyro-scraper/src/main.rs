//! gpyro-scraper - Roblox game data scraper
//!
//! Fetches the Rolimons game list, resolves every place id to its Roblox
//! universe id, pulls game and vote metadata, and saves the joined records.

use anyhow::Result;
use clap::Parser;
use gpyro_scraper::config::{load_toml, CliOverrides, ScraperConfig};
use gpyro_scraper::models::AccessType;
use gpyro_scraper::services::{
    save_catalog, save_game_data, GameDataPipeline, RobloxClient, RolimonsClient,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "gpyro-scraper", version, about = "Scrape Roblox game data for Rolimons-listed games")]
struct Args {
    /// TOML config file (defaults to the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of place ids to process (all when omitted)
    #[arg(long)]
    amount: Option<usize>,

    /// Upper bound on simultaneous lookup requests
    #[arg(long)]
    max_concurrent_requests: Option<usize>,

    /// Lookup requests per second per worker
    #[arg(long)]
    requests_per_second: Option<f64>,

    /// Skip place ids whose lookup fails instead of aborting
    #[arg(long)]
    ignore_failures: bool,

    /// Sample place ids at random instead of taking them in list order
    #[arg(long)]
    random: bool,

    /// Output file
    #[arg(long, default_value = "roblox_games_data.json")]
    output: PathBuf,

    /// Also save the full Rolimons game list to this file
    #[arg(long)]
    catalog_output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let toml_config = load_toml(args.config.as_deref())?;

    // RUST_LOG takes precedence over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&toml_config.logging.level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting gpyro-scraper");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let cli = CliOverrides {
        max_concurrent_requests: args.max_concurrent_requests,
        requests_per_second: args.requests_per_second,
        ignore_failures: args.ignore_failures.then_some(true),
        amount: args.amount,
    };
    let config = ScraperConfig::resolve(&cli, &toml_config)?;

    let rolimons = RolimonsClient::new(config.endpoints.rolimons_url.clone(), config.request_timeout)?;
    let catalog = rolimons.fetch_catalog().await?;
    if let Some(path) = &args.catalog_output {
        save_catalog(&catalog, path)?;
    }

    let access_type = if args.random {
        AccessType::Random
    } else {
        AccessType::Sequential
    };
    let place_ids = catalog.select_place_ids(config.amount, access_type)?;

    let roblox = Arc::new(RobloxClient::new(config.endpoints.clone(), config.request_timeout)?);
    let pipeline = GameDataPipeline::new(config, roblox)?;

    let cancel = CancellationToken::new();
    let ctrl_c_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, cancelling");
            ctrl_c_token.cancel();
        }
    });

    pipeline.get_games(&place_ids, &cancel).await?;
    save_game_data(pipeline.cache(), &args.output).await?;

    Ok(())
}
