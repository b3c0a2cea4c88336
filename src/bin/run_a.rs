//! Item service instance RunA.

use tracing::error;

use item_service::{metrics, server, utils, Config, Instance};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    utils::init_logging(false);
    metrics::init_metrics();

    let config = Config::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    server::run(Instance::RunA, &config).await?;
    Ok(())
}
