//! Axum extractor for order request bodies
//!
//! Bodies arrive as `{"data": {...}}`. [`OrderBody`] parses the JSON once and
//! hands the `data` member to [`OrderPayload::from_json`], so handlers never
//! touch raw JSON.

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde_json::Value;

use crate::core::{ApiError, OrderPayload, RequestError};

/// Typed payload taken from the request body's `data` member
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_order(
///     State(state): State<AppState>,
///     OrderBody(payload): OrderBody,
/// ) -> Result<impl IntoResponse, ApiError> {
///     // payload is parsed; the pipeline still has to accept it
/// }
/// ```
#[derive(Debug, Clone)]
pub struct OrderBody(pub OrderPayload);

impl OrderBody {
    pub fn into_inner(self) -> OrderPayload {
        self.0
    }
}

impl std::ops::Deref for OrderBody {
    type Target = OrderPayload;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequest<S> for OrderBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body): Json<Value> = Json::from_request(req, state).await.map_err(|e| {
            ApiError::from(RequestError::InvalidJson {
                message: e.body_text(),
            })
        })?;

        let data = body.get("data").unwrap_or(&Value::Null);
        Ok(OrderBody(OrderPayload::from_json(data)))
    }
}
