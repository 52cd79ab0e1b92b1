//! Curio marketplace server - entry point.

use anyhow::Result;
use clap::Parser;
use tracing::info;

/// Real-time collectibles marketplace
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via CURIO_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    curio_server::logging::init_logging();

    info!("Starting curio-server v{}", env!("CARGO_PKG_VERSION"));

    // Config path: CLI arg > CURIO_CONFIG env var > default
    let config_path = args
        .config
        .or_else(|| std::env::var("CURIO_CONFIG").ok())
        .unwrap_or_else(|| "config/default.toml".to_string());

    info!(config_path = %config_path, "Loading configuration");
    let config = curio_server::ServerConfig::load(&config_path)?;

    curio_server::run_server(config).await?;

    Ok(())
}
