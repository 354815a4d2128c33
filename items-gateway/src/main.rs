//! Entry point for the `items-gateway` HTTP server.

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use clap::Parser;
use items_core::DEFAULT_LISTING_PARTITION;
use items_gateway::{config::DEFAULT_INDEX_NAME, create_router, AppState, GatewayConfig};
use items_store::MemoryStore;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "items-gateway")]
#[command(about = "HTTP API for creating, fetching and listing items")]
#[command(version)]
struct Args {
    /// Address to listen on
    #[arg(long, env = "ITEMS_LISTEN_ADDR", default_value = "127.0.0.1:3456")]
    listen_addr: SocketAddr,

    /// Store table identifier; item requests fail with 500 while unset
    #[arg(long, env = "TABLE_NAME")]
    table_name: Option<String>,

    /// Secondary index used for listing
    #[arg(long, env = "GSI_NAME", default_value = DEFAULT_INDEX_NAME)]
    index_name: String,

    /// Partition value every item is listed under
    #[arg(long, env = "GSI_PK", default_value = DEFAULT_LISTING_PARTITION)]
    listing_partition: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = GatewayConfig::new(args.table_name)
        .with_index_name(args.index_name)
        .with_listing_partition(args.listing_partition);

    let table = match config.table_name() {
        Ok(table) => table.to_owned(),
        Err(e) => {
            warn!(error = %e, "item requests will fail until a table is configured");
            String::new()
        }
    };
    let store = Arc::new(MemoryStore::new(table.clone(), config.index_name.clone()));
    let app = create_router(AppState::new(store, config));

    let listener = tokio::net::TcpListener::bind(args.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", args.listen_addr))?;

    info!(addr = %args.listen_addr, table = %table, "items-gateway listening");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
