//! ServerBuilder for fluent API to build the order HTTP server

use crate::config::ServerConfig;
use crate::core::id::IdGenerator;
use crate::core::{Order, OrderService, OrderStore};
use crate::server::handlers::AppState;
use crate::server::router::build_app;
use crate::storage::InMemoryOrderStore;
use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;

/// Builder for the order server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(ServerConfig::load()?)
///     .build()?;
/// ```
pub struct ServerBuilder {
    config: ServerConfig,
    id_generator: Option<Box<dyn IdGenerator>>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with the default configuration
    pub fn new() -> Self {
        Self {
            config: ServerConfig::default(),
            id_generator: None,
        }
    }

    /// Use `config` for address, id strategy and seed data
    pub fn with_config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the id generator chosen by the config
    ///
    /// Mostly useful in tests, to get predictable ids.
    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.id_generator = Some(Box::new(ids));
        self
    }

    /// Add orders to the initial store contents
    pub fn with_seed_orders(mut self, orders: impl IntoIterator<Item = Order>) -> Self {
        self.config.seed_orders.extend(orders);
        self
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the order service with the seeded store
    pub fn build_service(mut self) -> Result<OrderService> {
        self.config.validate()?;

        let ids = self
            .id_generator
            .take()
            .unwrap_or_else(|| self.config.id_generator());
        let store = InMemoryOrderStore::with_orders(self.config.seed_orders.iter().cloned());

        tracing::debug!(seeded = store.len(), "order store initialised");
        Ok(OrderService::new(store, ids))
    }

    /// Build the final router
    pub fn build(self) -> Result<Router> {
        let service = self.build_service()?;
        Ok(build_app(AppState { service }))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the configured address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.bind_address.clone();
        let app = self.build()?;
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve when the process receives Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
