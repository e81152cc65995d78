//! Server module: HTTP surface for the order service
//!
//! - `extractor`: parses `{"data": ...}` request bodies into typed payloads
//! - `handlers`: one axum handler per order operation
//! - `router`: route table, health checks, fallback and middleware
//! - `builder`: `ServerBuilder` wiring config, store and id generator together

pub mod builder;
pub mod extractor;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use extractor::OrderBody;
pub use handlers::AppState;
pub use router::{build_app, build_order_routes};
