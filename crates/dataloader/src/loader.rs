use std::{collections::HashMap, sync::Arc};

use engine_value::ResolvedValue;
use registry::{FieldKey, Registry, ResolverDescriptor};

use crate::{dispatcher, slot::BatchSlot, DeferredHandle, LoaderError};

/// Per-request accumulator for batched field resolution.
///
/// One loader per request, handed to the engine explicitly: batch scope equals
/// request scope, there is no cross-request batching and no cache surviving
/// the request. Dropping the loader discards any open slots without firing
/// them; their handles observe a cancellation error instead of pending
/// forever.
pub struct Loader {
    registry: Arc<Registry>,
    slots: HashMap<FieldKey, BatchSlot>,
    last_fired_depth: Option<usize>,
}

impl Loader {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            slots: HashMap::new(),
            last_fired_depth: None,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Appends `parent` to the open slot for `key`, creating the slot on
    /// first use. An equal parent already enqueued in the open slot returns
    /// the same handle.
    pub fn enqueue(&mut self, key: &FieldKey, parent: ResolvedValue) -> Result<DeferredHandle, LoaderError> {
        let Some(ResolverDescriptor::Batched(field)) = self.registry.lookup(key) else {
            return Err(LoaderError::NotBatched { key: key.clone() });
        };

        let slot = self
            .slots
            .entry(key.clone())
            .or_insert_with(|| BatchSlot::new(key.clone()));
        Ok(slot.enqueue(parent, &field.config().equality))
    }

    /// Fires every slot accumulated since the last call, i.e. the slots of the
    /// sibling layer the engine just finished enqueueing. A layer without
    /// pending batches is a no-op.
    pub async fn fire_layer(&mut self, depth: usize) {
        if let Some(last) = self.last_fired_depth {
            debug_assert!(depth > last, "layers fire in strictly increasing depth order");
        }
        self.last_fired_depth = Some(depth);

        let slots: Vec<BatchSlot> = self.slots.drain().map(|(_, slot)| slot).collect();
        dispatcher::fire_all(&self.registry, slots, depth).await;
    }

    /// Number of slots still accepting parents.
    pub fn open_slots(&self) -> usize {
        self.slots.len()
    }
}
