//! Mutation and read handlers
//!
//! Each handler assumes its operation's pipeline has already passed. None of
//! them validate anything. The failures a caller can observe are [`create`]
//! running out of ids and [`delete`] finding nothing to remove, which means
//! the existence check and the removal did not run under the same store
//! guard.

use crate::core::id::IdGenerator;
use crate::core::order::{Order, OrderStatus};
use crate::core::payload::OrderDraft;
use crate::core::store::OrderStore;

/// Insert a new order built from `draft`
///
/// The id is the first one from `ids` that no live order holds, and the
/// status is always `pending`, whatever the client asked for. `None` when
/// `ids` is exhausted.
pub fn create(
    store: &mut dyn OrderStore,
    ids: &dyn IdGenerator,
    draft: OrderDraft,
) -> Option<Order> {
    let id = loop {
        let id = ids.next_id()?;
        if !store.contains(&id) {
            break id;
        }
        tracing::debug!(order_id = %id, "generated id already in use, drawing another");
    };

    let order = Order {
        id,
        deliver_to: draft.deliver_to,
        mobile_number: draft.mobile_number,
        status: OrderStatus::Pending,
        dishes: draft.dishes,
    };
    store.insert(order.clone());
    Some(order)
}

pub fn read(order: &Order) -> Order {
    order.clone()
}

/// Replace every field of `order` except its id
pub fn update(order: &mut Order, draft: OrderDraft) -> Order {
    order.deliver_to = draft.deliver_to;
    order.mobile_number = draft.mobile_number;
    if let Some(status) = draft.status {
        order.status = status;
    }
    order.dishes = draft.dishes;
    order.clone()
}

/// Remove the order with `order_id`, returning what was removed
pub fn delete(store: &mut dyn OrderStore, order_id: &str) -> Option<Order> {
    store.remove_by_id(order_id)
}

/// Every order, in insertion order
pub fn list(store: &dyn OrderStore) -> Vec<Order> {
    store.all().into_iter().cloned().collect()
}
