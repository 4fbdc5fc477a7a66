//! starchain-server entry point.

use anyhow::{Context, Result};
use clap::Parser;
use starchain_chain::StarRegistry;
use starchain_server::{router, ServerArgs};
use starchain_storage::ChainStore;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = ServerArgs::parse();
    let addr = args.bind_addr().context("invalid bind address")?;

    let registry = StarRegistry::new(Arc::new(ChainStore::new()), args.registry_config());
    registry.initialize();

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(
        %addr,
        window = args.window,
        "starchain-server v{} listening",
        env!("CARGO_PKG_VERSION")
    );

    axum::serve(listener, router(Arc::new(registry)))
        .await
        .context("server error")?;
    Ok(())
}
