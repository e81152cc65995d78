//! Storage implementations for order records

pub mod in_memory;

pub use in_memory::InMemoryOrderStore;
