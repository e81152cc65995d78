//! Order service: runs each operation as `[checks..., handler]`
//!
//! The store sits behind a single lock. A write takes the write guard once
//! and holds it across the whole pipeline and the handler, so no other
//! request can change the store between a passed check and the mutation it
//! guards.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::core::error::ApiError;
use crate::core::handlers;
use crate::core::id::IdGenerator;
use crate::core::order::Order;
use crate::core::payload::{OrderDraft, OrderPayload};
use crate::core::store::OrderStore;
use crate::core::validation::{CheckContext, Pipelines};

/// Dispatcher for the five order operations
///
/// Cheap to clone; clones share the same store.
#[derive(Clone)]
pub struct OrderService {
    store: Arc<RwLock<dyn OrderStore>>,
    ids: Arc<dyn IdGenerator>,
    pipelines: Arc<Pipelines>,
}

impl OrderService {
    pub fn new(store: impl OrderStore + 'static, ids: impl IdGenerator + 'static) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            ids: Arc::new(ids),
            pipelines: Arc::new(Pipelines::standard()),
        }
    }

    /// Validate `payload` and insert a new pending order
    pub fn create(&self, payload: &OrderPayload) -> Result<Order, ApiError> {
        let mut store = self.write_store()?;

        let ctx = CheckContext::new(&*store).with_payload(payload);
        self.pipelines.create.run(&ctx)?;

        let draft = OrderDraft::try_from(payload)?;
        let order = handlers::create(&mut *store, self.ids.as_ref(), draft).ok_or_else(|| {
            tracing::error!("order id generator exhausted");
            ApiError::Internal("no order ids left to assign".to_string())
        })?;

        tracing::info!(order_id = %order.id, dishes = order.dishes.len(), "order created");
        Ok(order)
    }

    pub fn read(&self, order_id: &str) -> Result<Order, ApiError> {
        let store = self.read_store()?;

        let ctx = CheckContext::new(&*store).with_route_id(order_id);
        self.pipelines.read.run(&ctx)?;

        store
            .find_by_id(order_id)
            .map(handlers::read)
            .ok_or_else(|| invariant_violation("read", order_id))
    }

    /// Validate `payload` against the order at `order_id` and apply it in place
    pub fn update(&self, order_id: &str, payload: &OrderPayload) -> Result<Order, ApiError> {
        let mut store = self.write_store()?;

        let ctx = CheckContext::new(&*store)
            .with_route_id(order_id)
            .with_payload(payload);
        self.pipelines.update.run(&ctx)?;

        let draft = OrderDraft::try_from(payload)?;
        let existing = store
            .find_by_id_mut(order_id)
            .ok_or_else(|| invariant_violation("update", order_id))?;
        let order = handlers::update(existing, draft);

        tracing::info!(order_id = %order.id, status = %order.status, "order updated");
        Ok(order)
    }

    pub fn delete(&self, order_id: &str) -> Result<(), ApiError> {
        let mut store = self.write_store()?;

        let ctx = CheckContext::new(&*store).with_route_id(order_id);
        self.pipelines.delete.run(&ctx)?;

        handlers::delete(&mut *store, order_id)
            .ok_or_else(|| invariant_violation("delete", order_id))?;

        tracing::info!(order_id = %order_id, "order deleted");
        Ok(())
    }

    pub fn list(&self) -> Result<Vec<Order>, ApiError> {
        let store = self.read_store()?;

        self.pipelines.list.run(&CheckContext::new(&*store))?;

        Ok(handlers::list(&*store))
    }

    /// Number of live orders
    pub fn len(&self) -> Result<usize, ApiError> {
        Ok(self.read_store()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, ApiError> {
        Ok(self.len()? == 0)
    }

    fn read_store(&self) -> Result<RwLockReadGuard<'_, dyn OrderStore + 'static>, ApiError> {
        self.store.read().map_err(|e| {
            tracing::error!("order store lock poisoned: {}", e);
            ApiError::Internal(format!("Failed to acquire read lock: {}", e))
        })
    }

    fn write_store(&self) -> Result<RwLockWriteGuard<'_, dyn OrderStore + 'static>, ApiError> {
        self.store.write().map_err(|e| {
            tracing::error!("order store lock poisoned: {}", e);
            ApiError::Internal(format!("Failed to acquire write lock: {}", e))
        })
    }
}

/// An order that passed its existence check vanished before the handler ran
fn invariant_violation(operation: &str, order_id: &str) -> ApiError {
    tracing::error!(
        operation,
        order_id,
        "order disappeared between existence check and {}",
        operation
    );
    ApiError::Internal(format!(
        "order {} disappeared during {}",
        order_id, operation
    ))
}
