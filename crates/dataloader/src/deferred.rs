use std::fmt;

use engine_value::ResolvedValue;
use futures_channel::oneshot;
use futures_util::{future::Shared, FutureExt};

use crate::BatchError;

pub(crate) type Fulfillment = Result<ResolvedValue, BatchError>;

/// A placeholder for a child value, filled exactly once when the owning batch
/// fires.
///
/// Clones observe the same fulfillment: equal parents enqueued into the same
/// slot all hold clones of one handle.
#[derive(Clone)]
pub struct DeferredHandle {
    shared: Shared<oneshot::Receiver<Fulfillment>>,
}

impl DeferredHandle {
    pub(crate) fn new() -> (oneshot::Sender<Fulfillment>, Self) {
        let (sender, receiver) = oneshot::channel();
        (
            sender,
            Self {
                shared: receiver.shared(),
            },
        )
    }

    /// Suspends until the owning slot is Closed. The engine only calls this
    /// after firing the layer, so in the cooperative model it resolves
    /// immediately; a slot dropped unfired resolves with
    /// [`BatchError::Cancelled`] rather than pending forever.
    pub async fn observe(&self) -> Result<ResolvedValue, BatchError> {
        match self.shared.clone().await {
            Ok(fulfillment) => fulfillment,
            Err(_cancelled) => Err(BatchError::Cancelled),
        }
    }

    /// Whether two handles observe the same fulfillment.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.shared.ptr_eq(&other.shared)
    }
}

impl fmt::Debug for DeferredHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DeferredHandle(..)")
    }
}
