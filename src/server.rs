//! Item service process lifecycle.

use std::future::Future;
use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::info;

use crate::api::create_router;
use crate::config::{Config, Instance};
use crate::error::Result;
use crate::store::ItemStore;
use crate::utils::shutdown_signal;

/// Bind the instance's port and serve a fresh collection until shutdown.
pub async fn run(instance: Instance, config: &Config) -> Result<()> {
    config.validate()?;

    let port = config.port_for(instance);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!("{} API listening on port {}", instance, port);

    serve(listener, ItemStore::new(), shutdown_signal()).await
}

/// Serve the item API on an already-bound listener.
pub async fn serve<F>(listener: TcpListener, store: ItemStore, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, create_router(store))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("HTTP server stopped");
    Ok(())
}
