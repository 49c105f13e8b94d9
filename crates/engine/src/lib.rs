//! A small GraphQL execution core built around batched field resolution.
//!
//! The engine walks a pre-validated query plan layer by layer. Fields whose
//! registration is batched are not resolved per parent: the parent is enqueued
//! into the request's [`dataloader::Loader`] and the field gets a deferred
//! handle instead. Once a whole sibling layer is enqueued the accumulated
//! batches fire, each invoking its resolver once with every parent that needs
//! the field, and the walk descends with the observed values. One query for
//! the parents, one batched call for all their children: no N+1.

mod error;
mod executor;
mod request;
mod response;

pub use error::{ExecutionError, ExecutionResult};
pub use executor::Engine;
pub use request::{Field, Operation, SelectionSet};
pub use response::{GraphqlError, PathSegment, Response, ResponsePath};
