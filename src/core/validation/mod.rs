//! Request validation pipeline
//!
//! Every write is guarded by an ordered chain of independent checks. The
//! chain for an operation is built once ([`Pipelines::standard`]) and run
//! against a [`CheckContext`] before the operation's handler is allowed to
//! touch the store.

pub mod checks;
pub mod pipeline;

pub use checks::{Check, CheckContext};
pub use pipeline::{Operation, Pipeline, Pipelines};
