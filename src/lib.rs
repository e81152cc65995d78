//! # Orders API
//!
//! Order management for a food-delivery API: create, read, update, delete
//! and list orders, each made of one or more dish line items.
//!
//! Every write runs through a validation [pipeline](core::validation) before
//! a mutation handler may touch the store. The pipeline is an ordered list of
//! independent checks and stops at the first failure, returning a classified
//! [`OrderError`](core::OrderError).
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use orders::prelude::*;
//!
//! let service = OrderService::new(InMemoryOrderStore::new(), RandomIdGenerator);
//!
//! let payload = OrderPayload::from_json(&serde_json::json!({
//!     "deliverTo": "123 Main",
//!     "mobileNumber": "555-0100",
//!     "dishes": [{ "id": "d1", "quantity": 2 }]
//! }));
//!
//! let order = service.create(&payload)?;
//! assert_eq!(order.status, OrderStatus::Pending);
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        ApiError, DishLineItem, IdGenerator, Order, OrderDraft, OrderError, OrderPayload, PayloadId,
        OrderService, OrderStatus, OrderStore, RandomIdGenerator, RequestError,
        SequentialIdGenerator,
    };

    // === Validation ===
    pub use crate::core::validation::{Check, CheckContext, Operation, Pipeline, Pipelines};

    // === Storage ===
    pub use crate::storage::InMemoryOrderStore;

    // === Config ===
    pub use crate::config::{IdStrategy, ServerConfig};

    // === Server ===
    pub use crate::server::{AppState, OrderBody, ServerBuilder, build_app};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use serde::{Deserialize, Serialize};
}
