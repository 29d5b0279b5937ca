use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use wwlln_client::WwllnClient;

#[derive(Debug, Parser)]
#[command(name = "wwlln-cli")]
#[command(about = "Query recent lightning strikes from the WWLLN feed")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print every strike in the current feed
    Dump,
    /// Print the strike closest to a point
    Nearest {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },
    /// Print strikes within a radius of a point
    Within {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// Search radius, in kilometres or miles depending on --unit
        #[arg(long)]
        radius: f64,
        /// "metric" or "imperial"
        #[arg(long, default_value = "metric")]
        unit: String,
        /// Only include strikes observed in the last N seconds
        #[arg(long)]
        window_secs: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = wwlln_core::load_client_config_from_env()?;
    tracing::debug!(?config, "loaded client config");
    let client = WwllnClient::new(&config)?;

    let output = match cli.command {
        Commands::Dump => {
            let snapshot = client.dump().await?;
            serde_json::to_string_pretty(&*snapshot)?
        }
        Commands::Nearest { lat, lon } => {
            let hit = client.nearest(lat, lon).await?;
            serde_json::to_string_pretty(&hit)?
        }
        Commands::Within {
            lat,
            lon,
            radius,
            unit,
            window_secs,
        } => {
            let window = window_secs.map(Duration::from_secs);
            let hits = client.within_radius(lat, lon, radius, &unit, window).await?;
            serde_json::to_string_pretty(&hits)?
        }
    };

    println!("{output}");
    Ok(())
}

#[cfg(test)]
mod tests;
