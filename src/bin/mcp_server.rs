//! MCP Server binary entry point
//!
//! Run with: COINMARKET_API_KEY=... cargo run --bin coinmarket-mcp

use coinmarket_mcp::CredentialConfig;
use coinmarket_mcp::mcp::CoinMarketService;
use rmcp::{ServiceExt, transport::stdio};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is fine; the variables may come from the environment
    dotenvy::dotenv().ok();

    // Initialize logging to stderr (stdout is for MCP protocol)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("CoinMarketCap MCP Server v{}", env!("CARGO_PKG_VERSION"));

    let config = CredentialConfig::from_env()?;
    info!(base_url = config.base_url(), "Loaded configuration");

    // Create the service and serve via stdio
    let service = CoinMarketService::new(config)?.serve(stdio()).await?;

    info!("MCP server running, waiting for requests...");

    // Wait for shutdown
    service.waiting().await?;

    info!("MCP server shutting down");
    Ok(())
}
