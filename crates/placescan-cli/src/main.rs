mod search;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Search Google Places for several keywords around a point and export the
/// unique hits to an Excel workbook.
#[derive(Debug, Parser)]
#[command(name = "placescan")]
#[command(about = "Multi-keyword Google Places search with Excel export")]
struct Cli {
    /// Google Maps API key (falls back to `GOOGLE_API_KEY`)
    #[arg(long = "api_key", env = "GOOGLE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    /// Latitude of the search center
    #[arg(long, allow_negative_numbers = true)]
    lat: f64,
    /// Longitude of the search center
    #[arg(long, allow_negative_numbers = true)]
    lng: f64,
    /// Search radius in meters
    #[arg(long, default_value_t = 35_000)]
    radius: u32,
    /// Comma-separated search terms, e.g. "coach,Arzt,Trainer"
    #[arg(long)]
    queries: String,
    /// Output workbook path
    #[arg(long, default_value = "results.xlsx")]
    output: PathBuf,
    /// Include a website column
    #[arg(long)]
    website: bool,
    /// Delay before each continuation page (overrides `PLACESCAN_PAGE_DELAY_MS`)
    #[arg(long)]
    page_delay_ms: Option<u64>,
    /// Maximum pages per keyword (overrides `PLACESCAN_MAX_PAGES`)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    max_pages: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = placescan_core::load_search_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    search::run_search(&config, &cli).await
}

#[cfg(test)]
mod tests;
