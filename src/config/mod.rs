//! Configuration loading and management

use crate::core::{Order, RandomIdGenerator, SequentialIdGenerator};
use crate::core::id::IdGenerator;
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Environment variable naming a YAML config file
pub const CONFIG_PATH_ENV: &str = "ORDERS_CONFIG";
/// Environment variable overriding `bind_address`
pub const BIND_ADDRESS_ENV: &str = "ORDERS_BIND_ADDRESS";
/// Environment variable overriding the port (binds on all interfaces)
pub const PORT_ENV: &str = "PORT";

/// How new order ids are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// 32 hex characters from a random UUID
    #[default]
    Random,
    /// `1`, `2`, `3`, ... continuing after the largest numeric seed id
    Sequential,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on
    pub bind_address: String,

    /// `tracing` filter used when `RUST_LOG` is not set
    pub log_filter: String,

    pub id_strategy: IdStrategy,

    /// Orders present in the store at start-up
    pub seed_orders: Vec<Order>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:5000".to_string(),
            log_filter: "info".to_string(),
            id_strategy: IdStrategy::Random,
            seed_orders: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    ///
    /// Seed orders are vetted against the order invariants.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `ORDERS_CONFIG` (if set), then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_yaml_file(&path)?,
            Err(_) => Self::default(),
        };
        config.apply_overrides(
            std::env::var(BIND_ADDRESS_ENV).ok(),
            std::env::var(PORT_ENV).ok(),
        )?;
        Ok(config)
    }

    /// Apply bind overrides; an explicit address wins over a bare port
    pub fn apply_overrides(
        &mut self,
        bind_address: Option<String>,
        port: Option<String>,
    ) -> Result<()> {
        if let Some(address) = bind_address {
            self.bind_address = address;
        } else if let Some(port) = port {
            let port: u16 = port
                .parse()
                .map_err(|_| anyhow::anyhow!("{} must be a port number, got '{}'", PORT_ENV, port))?;
            self.bind_address = format!("0.0.0.0:{}", port);
        }
        Ok(())
    }

    /// Reject seed data that breaks the order invariants
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for order in &self.seed_orders {
            if let Some(violation) = order.invariant_violation() {
                bail!("invalid seed order: {}", violation);
            }
            if !seen.insert(order.id.as_str()) {
                bail!("duplicate seed order id: {}", order.id);
            }
        }
        Ok(())
    }

    /// Build the id generator for the configured strategy
    pub fn id_generator(&self) -> Box<dyn IdGenerator> {
        match self.id_strategy {
            IdStrategy::Random => Box::new(RandomIdGenerator),
            IdStrategy::Sequential => {
                let last = self
                    .seed_orders
                    .iter()
                    .filter_map(|order| order.id.parse::<u64>().ok())
                    .max()
                    .unwrap_or(0);
                Box::new(SequentialIdGenerator::starting_after(last))
            }
        }
    }
}
