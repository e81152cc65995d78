//! Store trait for order records

use crate::core::order::Order;

/// Backing collection of live orders
///
/// Implementations own every [`Order`]; callers borrow records for the
/// duration of one request. Iteration order is insertion order. The store
/// does no validation of its own: uniqueness of ids comes from the
/// [`IdGenerator`](crate::core::id::IdGenerator).
pub trait OrderStore: Send + Sync {
    /// Append an order
    fn insert(&mut self, order: Order);

    /// Find an order by id
    fn find_by_id(&self, id: &str) -> Option<&Order>;

    /// Find an order by id for in-place mutation
    fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Order>;

    /// Remove the order with the given id, returning it
    fn remove_by_id(&mut self, id: &str) -> Option<Order>;

    /// All orders, in insertion order
    fn all(&self) -> Vec<&Order>;

    /// Number of live orders
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, id: &str) -> bool {
        self.find_by_id(id).is_some()
    }
}
