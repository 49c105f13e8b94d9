//! Decides when accumulated batches fire and distributes their results.
//!
//! The loader hands over every open slot of the current layer at once; slots
//! fire in any order relative to each other, but each one invokes its batched
//! resolver exactly once with the snapshot taken at firing time. The engine
//! only starts observing handles after [`fire_all`] returned, which is what
//! makes a handle's fulfillment happen-before its first observation.

use engine_value::ResolvedValue;
use futures_util::stream::{FuturesUnordered, StreamExt};
use registry::{NullPolicy, Registry, ResolverDescriptor};

use crate::{
    deferred::Fulfillment,
    slot::{BatchSlot, SlotState},
    BatchError,
};

pub(crate) async fn fire_all(registry: &Registry, slots: Vec<BatchSlot>, depth: usize) {
    #[cfg(feature = "tracing")]
    tracing::trace!(depth, slots = slots.len(), "firing layer");

    let mut firing: FuturesUnordered<_> = slots
        .into_iter()
        .filter(|slot| !slot.is_empty())
        .map(|slot| fire_slot(registry, slot, depth))
        .collect();

    while firing.next().await.is_some() {}
}

/// Invokes the slot's batched resolver once and fulfills every handle:
/// mapped parents get their child, unmapped parents get null or a local error
/// depending on the field's null policy, and a resolver failure taints the
/// whole batch with one shared error.
async fn fire_slot(registry: &Registry, mut slot: BatchSlot, depth: usize) {
    let Some(ResolverDescriptor::Batched(field)) = registry.lookup(slot.key()) else {
        unreachable!("loader only creates slots for batched registrations");
    };

    let (parents, senders) = slot.begin_firing();
    debug_assert!(slot.state() == SlotState::Firing);

    let resolve = field.resolver().resolve_batch(&parents);
    #[cfg(feature = "tracing")]
    let resolve = {
        use tracing::Instrument as _;
        resolve.instrument(tracing::info_span!(
            "batch_resolver",
            field = %slot.key(),
            depth,
            batch_size = parents.len(),
        ))
    };
    #[cfg(not(feature = "tracing"))]
    let _ = depth;

    match resolve.await {
        Ok(output) => {
            for (parent, sender) in parents.iter().zip(senders) {
                let fulfillment: Fulfillment = match output.get(parent, &field.config().equality) {
                    Some(child) => Ok(child.clone()),
                    None => match field.config().null_policy {
                        NullPolicy::Permissive => Ok(ResolvedValue::null()),
                        NullPolicy::Strict => Err(BatchError::MissingParent {
                            key: slot.key().clone(),
                        }),
                    },
                };
                // The receiver is gone when the walk was abandoned mid-layer.
                let _ = sender.send(fulfillment);
            }
        }
        Err(error) => {
            let failure = BatchError::Resolver {
                key: slot.key().clone(),
                message: error.message().to_string(),
            };
            for sender in senders {
                let _ = sender.send(Err(failure.clone()));
            }
        }
    }

    slot.close();
}
