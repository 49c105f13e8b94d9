use registry::FieldKey;

/// What a deferred handle resolves with when its batch went wrong. Cloned into
/// every handle sharing the slot, so it stays cheap and comparable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BatchError {
    /// The batched resolver failed; the whole batch carries the same error.
    #[error("batched resolver for {key} failed: {message}")]
    Resolver { key: FieldKey, message: String },
    /// The resolver succeeded but its mapping had no entry for this parent.
    #[error("batched resolver for {key} returned no entry for an enqueued parent")]
    MissingParent { key: FieldKey },
    /// The owning slot was discarded before it fired.
    #[error("request was cancelled before the batch fired")]
    Cancelled,
}

#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    #[error("no batched resolver registered for {key}")]
    NotBatched { key: FieldKey },
}
