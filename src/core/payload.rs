//! Request payloads for order writes
//!
//! Clients send `{"data": {...}}`. The `data` object is parsed exactly once,
//! at the boundary, into an [`OrderPayload`]: every field the checks look at
//! gets a typed slot, and any shape the checks must be able to reject (a
//! non-array `dishes`, a string quantity, ...) is kept as an explicit variant
//! rather than failing deserialization. Once the pipeline has accepted a
//! payload it is turned into an [`OrderDraft`], the only thing the mutation
//! handlers consume.

use serde_json::{Map, Value};

use crate::core::error::OrderError;
use crate::core::order::{DishLineItem, OrderStatus};

/// The `dishes` field as the client sent it
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DishesField {
    /// Missing, `null`, or another falsy value
    #[default]
    Absent,
    /// Present but not an array
    NotASequence,
    Items(Vec<DishPayload>),
}

/// One dish entry before validation
#[derive(Debug, Clone, PartialEq)]
pub struct DishPayload {
    pub id: Value,
    /// `Some` only when the client sent a JSON integer
    pub quantity: Option<i64>,
    /// Remaining catalog fields, copied through untouched
    pub details: Map<String, Value>,
}

impl DishPayload {
    /// Quantity as stored on a line item: an integer in `1..=u32::MAX`
    pub fn valid_quantity(&self) -> Option<u32> {
        self.quantity
            .and_then(|q| u32::try_from(q).ok())
            .filter(|q| *q > 0)
    }

    fn from_json(value: &Value) -> Self {
        let mut details = value.as_object().cloned().unwrap_or_default();
        let id = details.remove("id").unwrap_or(Value::Null);
        let quantity = details.remove("quantity").and_then(|q| q.as_i64());

        Self {
            id,
            quantity,
            details,
        }
    }
}

/// A truthy client-supplied `id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadId {
    Text(String),
    /// Any other JSON value, kept as its JSON text; never equals a route id
    NonString(String),
}

impl PayloadId {
    pub fn as_str(&self) -> &str {
        match self {
            PayloadId::Text(s) | PayloadId::NonString(s) => s,
        }
    }

    /// Strict equality with the `{orderId}` path segment
    pub fn matches(&self, route_id: &str) -> bool {
        matches!(self, PayloadId::Text(s) if s == route_id)
    }
}

/// A create or update payload, typed but not yet validated
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrderPayload {
    /// Client-supplied id; absent when missing or falsy
    pub id: Option<PayloadId>,
    pub deliver_to: Option<String>,
    pub mobile_number: Option<String>,
    pub status: Option<String>,
    pub dishes: DishesField,
}

impl OrderPayload {
    /// Parse the `data` member of a request body
    ///
    /// Never fails: a non-object `data` yields an empty payload so the
    /// pipeline reports the first missing field.
    pub fn from_json(data: &Value) -> Self {
        let Some(obj) = data.as_object() else {
            return Self::default();
        };

        Self {
            id: obj.get("id").and_then(truthy_id),
            deliver_to: string_field(obj, "deliverTo"),
            mobile_number: string_field(obj, "mobileNumber"),
            status: string_field(obj, "status"),
            dishes: match obj.get("dishes") {
                Some(Value::Array(items)) => {
                    DishesField::Items(items.iter().map(DishPayload::from_json).collect())
                }
                Some(value) if is_truthy(value) => DishesField::NotASequence,
                _ => DishesField::Absent,
            },
        }
    }

    /// `deliverTo`, present and non-empty
    pub fn require_deliver_to(&self) -> Result<&str, OrderError> {
        non_empty(self.deliver_to.as_deref()).ok_or(OrderError::invalid_field("deliverTo"))
    }

    /// `mobileNumber`, present and non-empty
    pub fn require_mobile_number(&self) -> Result<&str, OrderError> {
        non_empty(self.mobile_number.as_deref()).ok_or(OrderError::invalid_field("mobileNumber"))
    }

    /// `dishes`, present (but possibly not a usable sequence)
    pub fn require_dishes_present(&self) -> Result<&DishesField, OrderError> {
        match &self.dishes {
            DishesField::Absent => Err(OrderError::invalid_field("dishes")),
            dishes => Ok(dishes),
        }
    }

    /// `dishes`, a sequence with at least one entry
    pub fn require_dish_items(&self) -> Result<&[DishPayload], OrderError> {
        match self.require_dishes_present()? {
            DishesField::Items(items) if !items.is_empty() => Ok(items),
            _ => Err(OrderError::invalid_field_because(
                "dishes",
                "at least one dish",
            )),
        }
    }

    /// Every dish carries a valid quantity; reports the first offender
    pub fn require_dish_quantities(&self) -> Result<Vec<DishLineItem>, OrderError> {
        self.require_dish_items()?
            .iter()
            .enumerate()
            .map(|(index, dish)| {
                dish.valid_quantity()
                    .map(|quantity| DishLineItem {
                        id: dish.id.clone(),
                        quantity,
                        details: dish.details.clone(),
                    })
                    .ok_or(OrderError::InvalidDish { index })
            })
            .collect()
    }

    /// `status`, one of the accepted values
    pub fn require_status(&self) -> Result<OrderStatus, OrderError> {
        self.status
            .as_deref()
            .and_then(|s| s.parse().ok())
            .ok_or(OrderError::InvalidStatus)
    }
}

/// A payload that has passed the field checks
///
/// `status` is only carried for updates; create ignores it.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub deliver_to: String,
    pub mobile_number: String,
    pub status: Option<OrderStatus>,
    pub dishes: Vec<DishLineItem>,
}

impl TryFrom<&OrderPayload> for OrderDraft {
    type Error = OrderError;

    fn try_from(payload: &OrderPayload) -> Result<Self, Self::Error> {
        Ok(Self {
            deliver_to: payload.require_deliver_to()?.to_string(),
            mobile_number: payload.require_mobile_number()?.to_string(),
            status: payload.status.as_deref().and_then(|s| s.parse().ok()),
            dishes: payload.require_dish_quantities()?,
        })
    }
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn truthy_id(value: &Value) -> Option<PayloadId> {
    if !is_truthy(value) {
        return None;
    }
    match value {
        Value::String(s) => Some(PayloadId::Text(s.clone())),
        other => Some(PayloadId::NonString(other.to_string())),
    }
}
