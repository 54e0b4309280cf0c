//! Frontend gateway: static assets plus optional relay to the item API.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use item_stack::config::{load_config, Component};
use item_stack::lifecycle::{wait_for_signal, Shutdown};
use item_stack::observability::{logging, metrics};
use item_stack::GatewayServer;

#[derive(Parser)]
#[command(name = "item-gateway")]
#[command(about = "Serves the item frontend and relays API calls", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref(), Component::Gateway)?;

    logging::init_logging(&config.observability);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "item-gateway starting");

    if config.observability.metrics_enabled {
        metrics::init_metrics(config.observability.metrics_address.parse()?);
    }

    let listener = TcpListener::bind(&config.gateway.bind_address).await?;

    let shutdown = Shutdown::new();
    tokio::spawn(wait_for_signal(shutdown.clone()));

    let server = GatewayServer::new(config.gateway)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
