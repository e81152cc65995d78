//! Typed error handling for the order service
//!
//! Two layers:
//!
//! - [`OrderError`]: the classified failures a validation check can raise.
//!   Every rejected request carries exactly one of these.
//! - [`ApiError`]: what an HTTP handler returns. It wraps [`OrderError`] and
//!   adds the request-level and internal failures that sit outside the
//!   pipeline (malformed JSON, unknown path, a poisoned store lock).
//!
//! # Example
//!
//! ```rust,ignore
//! match service.read("missing") {
//!     Err(ApiError::Order(OrderError::NotFound { order_id })) => {
//!         println!("no order {}", order_id);
//!     }
//!     Err(e) => eprintln!("other error: {}", e),
//!     Ok(order) => println!("found {:?}", order),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;
use std::fmt;

use crate::core::order::OrderStatus;

// =============================================================================
// Order Errors
// =============================================================================

/// A classified validation failure
///
/// The pipeline stops at the first check that returns one of these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    /// The addressed order does not exist
    #[error("Order does not exist: {order_id}.")]
    NotFound { order_id: String },

    /// A required field is missing, empty, or malformed
    #[error("{}", invalid_field_message(.field, .reason))]
    InvalidField {
        field: &'static str,
        reason: Option<&'static str>,
    },

    /// The dish at `index` has a missing, non-integer or non-positive quantity
    #[error("Dish {index} must have a quantity that is an integer greater than 0")]
    InvalidDish { index: usize },

    /// The update payload names a different order than the route
    #[error("Order id does not match route id. Order: {payload_id}, Route: {route_id}")]
    IdMismatch { payload_id: String, route_id: String },

    /// Status absent or outside the accepted set
    #[error("Order must have a status of {}", status_list())]
    InvalidStatus,
}

fn invalid_field_message(field: &str, reason: &Option<&'static str>) -> String {
    match (field, *reason) {
        (_, Some(reason)) => format!("Order must include {}", reason),
        ("dishes", None) => "Order must include a dish".to_string(),
        (field, None) => format!("Order must include a {}", field),
    }
}

fn status_list() -> String {
    OrderStatus::ALL
        .iter()
        .map(OrderStatus::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

impl OrderError {
    pub fn not_found(order_id: impl Into<String>) -> Self {
        OrderError::NotFound {
            order_id: order_id.into(),
        }
    }

    pub fn invalid_field(field: &'static str) -> Self {
        OrderError::InvalidField {
            field,
            reason: None,
        }
    }

    pub fn invalid_field_because(field: &'static str, reason: &'static str) -> Self {
        OrderError::InvalidField {
            field,
            reason: Some(reason),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            OrderError::NotFound { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            OrderError::NotFound { .. } => "ORDER_NOT_FOUND",
            OrderError::InvalidField { .. } => "INVALID_FIELD",
            OrderError::InvalidDish { .. } => "INVALID_DISH",
            OrderError::IdMismatch { .. } => "ID_MISMATCH",
            OrderError::InvalidStatus => "INVALID_STATUS",
        }
    }

    /// Context needed to reproduce the failing condition
    fn details(&self) -> serde_json::Value {
        match self {
            OrderError::NotFound { order_id } => json!({ "orderId": order_id }),
            OrderError::InvalidField { field, reason } => {
                json!({ "field": field, "reason": reason })
            }
            OrderError::InvalidDish { index } => json!({ "index": index }),
            OrderError::IdMismatch {
                payload_id,
                route_id,
            } => json!({ "payloadId": payload_id, "routeId": route_id }),
            OrderError::InvalidStatus => json!({ "allowed": OrderStatus::ALL }),
        }
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Failures detected before a request reaches the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// Body was not valid JSON
    InvalidJson { message: String },

    /// No route matches the path
    PathNotFound { path: String },
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::InvalidJson { message } => write!(f, "Invalid JSON: {}", message),
            RequestError::PathNotFound { path } => write!(f, "Path not found: {}", path),
        }
    }
}

impl std::error::Error for RequestError {}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::InvalidJson { .. } => StatusCode::BAD_REQUEST,
            RequestError::PathNotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidJson { .. } => "INVALID_JSON",
            RequestError::PathNotFound { .. } => "PATH_NOT_FOUND",
        }
    }
}

// =============================================================================
// API Error
// =============================================================================

/// The error type returned by every service operation and HTTP handler
#[derive(Debug)]
pub enum ApiError {
    /// Validation failure from the pipeline
    Order(OrderError),

    /// Malformed request
    Request(RequestError),

    /// Broken internal invariant (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Order(e) => write!(f, "{}", e),
            ApiError::Request(e) => write!(f, "{}", e),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Order(e) => Some(e),
            ApiError::Request(e) => Some(e),
            ApiError::Internal(_) => None,
        }
    }
}

/// Error body sent to HTTP clients
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable message
    pub error: String,
    /// Error code for programmatic handling
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Order(e) => e.status_code(),
            ApiError::Request(e) => e.status_code(),
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Order(e) => e.error_code(),
            ApiError::Request(e) => e.error_code(),
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
            code: self.error_code().to_string(),
            details: match self {
                ApiError::Order(e) => Some(e.details()),
                _ => None,
            },
        }
    }

    /// The validation failure behind this error, if any
    pub fn as_order_error(&self) -> Option<&OrderError> {
        match self {
            ApiError::Order(e) => Some(e),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        ApiError::Order(err)
    }
}

impl From<RequestError> for ApiError {
    fn from(err: RequestError) -> Self {
        ApiError::Request(err)
    }
}
