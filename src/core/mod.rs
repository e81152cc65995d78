//! Core module containing the order model, validation pipeline and handlers

pub mod error;
pub mod handlers;
pub mod id;
pub mod order;
pub mod payload;
pub mod service;
pub mod store;
pub mod validation;

pub use error::{ApiError, OrderError, RequestError};
pub use id::{IdGenerator, RandomIdGenerator, SequentialIdGenerator};
pub use order::{DishLineItem, Order, OrderStatus};
pub use payload::{DishPayload, DishesField, OrderDraft, OrderPayload, PayloadId};
pub use service::OrderService;
pub use store::OrderStore;
