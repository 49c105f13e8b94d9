use dataloader::{BatchError, LoaderError};
use registry::ResolverError;

/// Everything that can go wrong while resolving a single field. Converted into
/// a [`crate::GraphqlError`] at the field's response path, so one failing
/// field never takes down the rest of the response.
#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error("{0}")]
    Resolver(#[from] ResolverError),
    #[error(transparent)]
    Batch(#[from] BatchError),
    #[error(transparent)]
    Loader(#[from] LoaderError),
    #[error("cannot apply a selection set on {ty} to a non-object value")]
    NonObjectValue { ty: String },
}

pub type ExecutionResult<T> = Result<T, ExecutionError>;
