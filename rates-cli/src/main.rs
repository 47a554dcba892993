//! Exchange Rates CLI
//!
//! Command-line interface for the Exchange Rates API.

use anyhow::Result;
use clap::{Parser, Subcommand};

use rates_client::RatesClient;

#[derive(Parser)]
#[command(name = "rates")]
#[command(author, version, about = "Exchange Rates API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Exchange Rates API
    #[arg(long, env = "RATES_API_URL", default_value = "http://localhost:3000")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check API health
    Health,
    /// Fetch merged exchange rates
    Get {
        /// Base currency code
        #[arg(long)]
        base: String,
        /// Target currency codes (comma-separated)
        #[arg(long)]
        symbols: String,
    },
    /// Show per-provider metrics
    Metrics,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = RatesClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Get { base, symbols } => {
            let rates = client.exchange_rates(&base, &symbols).await?;
            println!("{}", serde_json::to_string_pretty(&rates)?);
        }

        Commands::Metrics => {
            let metrics = client.metrics().await?;
            println!("{}", serde_json::to_string_pretty(&metrics)?);
        }
    }

    Ok(())
}
