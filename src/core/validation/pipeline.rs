//! Fixed-order check runner
//!
//! A [`Pipeline`] is the ordered list of checks guarding one operation. It
//! evaluates them strictly in sequence and stops at the first failure; no
//! later check runs and nothing is mutated until every check has passed.

use std::fmt;

use super::checks::{
    Check, CheckContext, DeliverToPresent, DishQuantitiesValid, DishesNonEmpty, DishesPresent,
    IdMatchesRoute, MobileNumberPresent, OrderExists, StatusValid,
};
use crate::core::error::OrderError;

/// The operations exposed by the order service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
    List,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::List => "list",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered checks for one operation
pub struct Pipeline {
    operation: Operation,
    checks: Vec<Box<dyn Check>>,
}

impl Pipeline {
    /// An empty pipeline for `operation`
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            checks: Vec::new(),
        }
    }

    /// Append a check; it runs after every check already added
    pub fn then(mut self, check: impl Check + 'static) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    /// The standard chain for an operation
    ///
    /// - create: field checks
    /// - update: existence, id match, field checks, status
    /// - read / delete: existence
    /// - list: nothing
    pub fn for_operation(operation: Operation) -> Self {
        let pipeline = Self::new(operation);
        match operation {
            Operation::Create => pipeline.with_field_checks(),
            Operation::Update => pipeline
                .then(OrderExists)
                .then(IdMatchesRoute)
                .with_field_checks()
                .then(StatusValid),
            Operation::Read | Operation::Delete => pipeline.then(OrderExists),
            Operation::List => pipeline,
        }
    }

    fn with_field_checks(self) -> Self {
        self.then(DeliverToPresent)
            .then(MobileNumberPresent)
            .then(DishesPresent)
            .then(DishesNonEmpty)
            .then(DishQuantitiesValid)
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Names of the checks, in execution order
    pub fn check_names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|check| check.name()).collect()
    }

    /// Run every check in order, stopping at the first failure
    pub fn run(&self, ctx: &CheckContext<'_>) -> Result<(), OrderError> {
        for check in &self.checks {
            if let Err(err) = check.check(ctx) {
                tracing::debug!(
                    operation = %self.operation,
                    check = check.name(),
                    code = err.error_code(),
                    "request rejected: {}",
                    err
                );
                return Err(err);
            }
        }
        Ok(())
    }
}

/// One prebuilt pipeline per operation
pub struct Pipelines {
    pub create: Pipeline,
    pub read: Pipeline,
    pub update: Pipeline,
    pub delete: Pipeline,
    pub list: Pipeline,
}

impl Pipelines {
    pub fn standard() -> Self {
        Self {
            create: Pipeline::for_operation(Operation::Create),
            read: Pipeline::for_operation(Operation::Read),
            update: Pipeline::for_operation(Operation::Update),
            delete: Pipeline::for_operation(Operation::Delete),
            list: Pipeline::for_operation(Operation::List),
        }
    }
}

impl Default for Pipelines {
    fn default() -> Self {
        Self::standard()
    }
}
