//! Individual validation checks
//!
//! Each check looks at one precondition of a write and either passes or
//! returns the classified [`OrderError`] for it. Checks are independent of
//! each other; their order is decided by the
//! [`Pipeline`](super::pipeline::Pipeline).

use crate::core::error::OrderError;
use crate::core::payload::{DishesField, OrderPayload};
use crate::core::store::OrderStore;

static EMPTY_PAYLOAD: OrderPayload = OrderPayload {
    id: None,
    deliver_to: None,
    mobile_number: None,
    status: None,
    dishes: DishesField::Absent,
};

/// Everything a check may look at for one request
pub struct CheckContext<'a> {
    store: &'a dyn OrderStore,
    route_id: Option<&'a str>,
    payload: Option<&'a OrderPayload>,
}

impl<'a> CheckContext<'a> {
    pub fn new(store: &'a dyn OrderStore) -> Self {
        Self {
            store,
            route_id: None,
            payload: None,
        }
    }

    /// The `{orderId}` the request is addressed to
    pub fn with_route_id(mut self, route_id: &'a str) -> Self {
        self.route_id = Some(route_id);
        self
    }

    pub fn with_payload(mut self, payload: &'a OrderPayload) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn store(&self) -> &dyn OrderStore {
        self.store
    }

    pub fn route_id(&self) -> &str {
        self.route_id.unwrap_or_default()
    }

    /// The request payload; an empty one when the operation has none
    pub fn payload(&self) -> &OrderPayload {
        self.payload.unwrap_or(&EMPTY_PAYLOAD)
    }
}

/// A single, order-sensitive precondition
pub trait Check: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    fn check(&self, ctx: &CheckContext<'_>) -> Result<(), OrderError>;
}

/// The addressed order exists in the store
pub struct OrderExists;

impl Check for OrderExists {
    fn name(&self) -> &'static str {
        "order_exists"
    }

    fn check(&self, ctx: &CheckContext<'_>) -> Result<(), OrderError> {
        let order_id = ctx.route_id();
        if ctx.store().contains(order_id) {
            Ok(())
        } else {
            Err(OrderError::not_found(order_id))
        }
    }
}

/// A payload id, when given, names the addressed order
pub struct IdMatchesRoute;

impl Check for IdMatchesRoute {
    fn name(&self) -> &'static str {
        "id_matches_route"
    }

    fn check(&self, ctx: &CheckContext<'_>) -> Result<(), OrderError> {
        match &ctx.payload().id {
            Some(payload_id) if !payload_id.matches(ctx.route_id()) => {
                Err(OrderError::IdMismatch {
                    payload_id: payload_id.as_str().to_string(),
                    route_id: ctx.route_id().to_string(),
                })
            }
            _ => Ok(()),
        }
    }
}

pub struct DeliverToPresent;

impl Check for DeliverToPresent {
    fn name(&self) -> &'static str {
        "deliver_to_present"
    }

    fn check(&self, ctx: &CheckContext<'_>) -> Result<(), OrderError> {
        ctx.payload().require_deliver_to().map(|_| ())
    }
}

pub struct MobileNumberPresent;

impl Check for MobileNumberPresent {
    fn name(&self) -> &'static str {
        "mobile_number_present"
    }

    fn check(&self, ctx: &CheckContext<'_>) -> Result<(), OrderError> {
        ctx.payload().require_mobile_number().map(|_| ())
    }
}

pub struct DishesPresent;

impl Check for DishesPresent {
    fn name(&self) -> &'static str {
        "dishes_present"
    }

    fn check(&self, ctx: &CheckContext<'_>) -> Result<(), OrderError> {
        ctx.payload().require_dishes_present().map(|_| ())
    }
}

/// `dishes` is a sequence with at least one entry
pub struct DishesNonEmpty;

impl Check for DishesNonEmpty {
    fn name(&self) -> &'static str {
        "dishes_non_empty"
    }

    fn check(&self, ctx: &CheckContext<'_>) -> Result<(), OrderError> {
        ctx.payload().require_dish_items().map(|_| ())
    }
}

/// Every dish has an integer quantity greater than zero
pub struct DishQuantitiesValid;

impl Check for DishQuantitiesValid {
    fn name(&self) -> &'static str {
        "dish_quantities_valid"
    }

    fn check(&self, ctx: &CheckContext<'_>) -> Result<(), OrderError> {
        let items = ctx.payload().require_dish_items()?;
        match items.iter().position(|dish| dish.valid_quantity().is_none()) {
            Some(index) => Err(OrderError::InvalidDish { index }),
            None => Ok(()),
        }
    }
}

pub struct StatusValid;

impl Check for StatusValid {
    fn name(&self) -> &'static str {
        "status_valid"
    }

    fn check(&self, ctx: &CheckContext<'_>) -> Result<(), OrderError> {
        ctx.payload().require_status().map(|_| ())
    }
}
