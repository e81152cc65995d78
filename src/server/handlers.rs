//! HTTP handlers for order operations
//!
//! Thin adapters: each one unpacks the request, calls the matching
//! [`OrderService`] operation and wraps the result in a `{"data": ...}`
//! envelope.

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::IntoResponse,
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::core::{ApiError, Order, OrderService, RequestError};
use crate::server::extractor::OrderBody;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: OrderService,
}

/// Success body: `{"data": ...}`
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Json<Self> {
        Json(Self { data })
    }
}

pub async fn list_orders(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Vec<Order>>>, ApiError> {
    Ok(DataResponse::new(state.service.list()?))
}

pub async fn create_order(
    State(state): State<AppState>,
    OrderBody(payload): OrderBody,
) -> Result<impl IntoResponse, ApiError> {
    let order = state.service.create(&payload)?;
    Ok((StatusCode::CREATED, DataResponse::new(order)))
}

pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<DataResponse<Order>>, ApiError> {
    Ok(DataResponse::new(state.service.read(&order_id)?))
}

pub async fn update_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
    OrderBody(payload): OrderBody,
) -> Result<Json<DataResponse<Order>>, ApiError> {
    Ok(DataResponse::new(state.service.update(&order_id, &payload)?))
}

pub async fn delete_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.service.delete(&order_id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Health check endpoint handler
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Fallback for unmatched paths
pub async fn path_not_found(uri: Uri) -> ApiError {
    RequestError::PathNotFound {
        path: uri.path().to_string(),
    }
    .into()
}
