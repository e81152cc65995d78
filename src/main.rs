//! Order API server
//!
//! Configuration comes from the YAML file named by `ORDERS_CONFIG` (optional)
//! with `ORDERS_BIND_ADDRESS` / `PORT` overrides. Logging honours `RUST_LOG`.

use anyhow::Result;
use orders::config::ServerConfig;
use orders::server::ServerBuilder;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::load()?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!(
        bind_address = %config.bind_address,
        id_strategy = ?config.id_strategy,
        seed_orders = config.seed_orders.len(),
        "starting {} v{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    ServerBuilder::new().with_config(config).serve().await
}
