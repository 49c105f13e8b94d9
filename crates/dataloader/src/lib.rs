//! Per-request batching of field resolution.
//!
//! When a response needs the same sub-field of many parent objects of the same
//! type, the engine enqueues each parent here instead of resolving the field
//! N times. Once the whole sibling layer is enqueued it fires the layer: every
//! accumulated slot invokes its batched resolver exactly once with the
//! deduplicated, insertion-ordered parent list and fulfills the deferred
//! handles from the returned mapping.

mod deferred;
mod dispatcher;
mod error;
mod loader;
mod slot;

pub use deferred::DeferredHandle;
pub use error::{BatchError, LoaderError};
pub use loader::Loader;
