use anyhow::{ensure, Result};
use clap::{Parser, Subcommand};
use gm_locator::{config::LocatorConfig, stdio_server, LocatorEngine};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Local fuzzy search over Greater Manchester locations")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank locations for a query; prints a JSON array or { "message": ... }
    Search { query: String },
    /// Autocomplete suggestions (same ranking as search)
    Suggest { query: String },
    /// List police stations, or the nearest ones to --lat/--lon
    Stations {
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,
        #[arg(long, default_value_t = 3)]
        limit: usize,
    },
    /// Serve JSON-RPC 2.0 over stdin/stdout
    Serve,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let engine = LocatorEngine::from_config(&LocatorConfig::from_env())?;

    match cli.command {
        Command::Search { query } => {
            let outcome = engine.search_locations(&query).await;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        Command::Suggest { query } => {
            let outcome = engine.get_suggestions(&query).await;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        Command::Stations { lat, lon, limit } => cmd_stations(&engine, lat, lon, limit)?,
        Command::Serve => stdio_server::run(&engine).await?,
    }
    Ok(())
}

fn cmd_stations(
    engine: &LocatorEngine,
    lat: Option<f64>,
    lon: Option<f64>,
    limit: usize,
) -> Result<()> {
    let (Some(lat), Some(lon)) = (lat, lon) else {
        println!("{}", serde_json::to_string_pretty(engine.stations())?);
        return Ok(());
    };
    ensure!(lat.is_finite() && lon.is_finite(), "coordinates must be finite numbers");
    let nearby = engine.nearest_stations(lat, lon, limit);
    println!("{}", serde_json::to_string_pretty(&nearby)?);
    Ok(())
}
