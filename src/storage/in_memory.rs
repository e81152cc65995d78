//! In-memory implementation of OrderStore

use crate::core::{Order, OrderStore};
use indexmap::IndexMap;

/// In-memory order store
///
/// Keyed by order id for O(1) lookup while keeping insertion order for
/// listing. Removal shifts later entries down so that order is preserved.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderStore {
    orders: IndexMap<String, Order>,
}

impl InMemoryOrderStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            orders: IndexMap::new(),
        }
    }

    /// Create a store holding `orders`, in the given order
    pub fn with_orders(orders: impl IntoIterator<Item = Order>) -> Self {
        let mut store = Self::new();
        for order in orders {
            store.insert(order);
        }
        store
    }
}

impl OrderStore for InMemoryOrderStore {
    fn insert(&mut self, order: Order) {
        self.orders.insert(order.id.clone(), order);
    }

    fn find_by_id(&self, id: &str) -> Option<&Order> {
        self.orders.get(id)
    }

    fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Order> {
        self.orders.get_mut(id)
    }

    fn remove_by_id(&mut self, id: &str) -> Option<Order> {
        self.orders.shift_remove(id)
    }

    fn all(&self) -> Vec<&Order> {
        self.orders.values().collect()
    }

    fn len(&self) -> usize {
        self.orders.len()
    }
}
