//! Order resource and its dish line items

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::core::error::OrderError;

/// Lifecycle status of an order
///
/// Serialized in kebab-case (`out-for-delivery`), which is also the form
/// clients send in update payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    OutForDelivery,
    Delivered,
}

impl OrderStatus {
    /// Every accepted status, in lifecycle order
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::OutForDelivery => "out-for-delivery",
            OrderStatus::Delivered => "delivered",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or(OrderError::InvalidStatus)
    }
}

/// A (catalog dish, quantity) pair within an order
///
/// The dish reference is opaque to this service. Any extra catalog fields the
/// client sends along (name, price, ...) are kept verbatim in `details`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DishLineItem {
    #[serde(default)]
    pub id: Value,

    pub quantity: u32,

    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl DishLineItem {
    pub fn new(id: impl Into<Value>, quantity: u32) -> Self {
        Self {
            id: id.into(),
            quantity,
            details: Map::new(),
        }
    }
}

/// A delivery order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// System-assigned identity, immutable once set
    pub id: String,
    pub deliver_to: String,
    pub mobile_number: String,
    pub status: OrderStatus,
    pub dishes: Vec<DishLineItem>,
}

impl Order {
    /// Check the data-model invariants that hold for every stored order
    ///
    /// Returns a description of the first violation. Used to vet orders that
    /// enter the store without going through the request pipeline (seed data).
    pub fn invariant_violation(&self) -> Option<String> {
        if self.id.is_empty() {
            return Some("order id must not be empty".to_string());
        }
        if self.deliver_to.is_empty() {
            return Some(format!("order {} has an empty deliverTo", self.id));
        }
        if self.mobile_number.is_empty() {
            return Some(format!("order {} has an empty mobileNumber", self.id));
        }
        if self.dishes.is_empty() {
            return Some(format!("order {} has no dishes", self.id));
        }
        self.dishes
            .iter()
            .position(|dish| dish.quantity == 0)
            .map(|index| format!("order {} dish {} has a zero quantity", self.id, index))
    }
}
