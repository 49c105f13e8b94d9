use serde::Serialize;

use super::ResponsePath;

/// An error attached to one position of the response. Failures stay local:
/// unrelated fields of the same response still resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{message} at {path}")]
pub struct GraphqlError {
    pub message: String,
    pub path: ResponsePath,
}

impl GraphqlError {
    pub fn new(message: impl Into<String>, path: ResponsePath) -> Self {
        Self {
            message: message.into(),
            path,
        }
    }
}
