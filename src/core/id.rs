//! Order id generation
//!
//! Ids are handed out by an injected [`IdGenerator`] so tests can use a
//! deterministic sequence while the server uses random ids.

use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Produces a previously-unused identifier on every call
///
/// Uniqueness is only required for the lifetime of the process. `None`
/// means the generator has run out of ids.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> Option<String>;
}

impl<T: IdGenerator + ?Sized> IdGenerator for Box<T> {
    fn next_id(&self) -> Option<String> {
        (**self).next_id()
    }
}

/// 32 lowercase hex characters from a random v4 UUID
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn next_id(&self) -> Option<String> {
        Some(Uuid::new_v4().simple().to_string())
    }
}

/// Decimal counter: `1`, `2`, `3`, ... up to `u64::MAX`
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    last: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue after `last` (the next id will be `last + 1`)
    pub fn starting_after(last: u64) -> Self {
        Self {
            last: AtomicU64::new(last),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> Option<String> {
        self.last
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |last| last.checked_add(1))
            .ok()
            .map(|last| (last + 1).to_string())
    }
}
