//! Item API server.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use item_stack::config::{load_config, Component};
use item_stack::lifecycle::{wait_for_signal, Shutdown};
use item_stack::observability::{logging, metrics};
use item_stack::ApiServer;

#[derive(Parser)]
#[command(name = "item-api")]
#[command(about = "In-memory item CRUD API", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref(), Component::Api)?;

    logging::init_logging(&config.observability);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "item-api starting");

    if config.observability.metrics_enabled {
        metrics::init_metrics(config.observability.metrics_address.parse()?);
    }

    let listener = TcpListener::bind(&config.api.bind_address).await?;

    let shutdown = Shutdown::new();
    tokio::spawn(wait_for_signal(shutdown.clone()));

    let server = ApiServer::new(config.api);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
