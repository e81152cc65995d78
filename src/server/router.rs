//! Router assembly for the order API

use axum::{Router, routing::get};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::server::handlers::{
    AppState, create_order, delete_order, get_order, health_check, list_orders, path_not_found,
    update_order,
};

/// Order routes:
/// - GET /orders - List orders
/// - POST /orders - Create an order
/// - GET /orders/{order_id} - Read an order
/// - PUT /orders/{order_id} - Update an order
/// - DELETE /orders/{order_id} - Delete an order
pub fn build_order_routes(state: AppState) -> Router {
    Router::new()
        .route("/orders", get(list_orders).post(create_order))
        .route(
            "/orders/{order_id}",
            get(get_order).put(update_order).delete(delete_order),
        )
        .with_state(state)
}

/// Health check routes
pub fn build_health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

/// The full application: order routes, health routes, 404 fallback,
/// request tracing and CORS
pub fn build_app(state: AppState) -> Router {
    build_health_routes()
        .merge(build_order_routes(state))
        .fallback(path_not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}
