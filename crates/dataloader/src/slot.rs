use engine_value::{ParentEquality, ResolvedValue};
use futures_channel::oneshot;
use registry::FieldKey;

use crate::deferred::{DeferredHandle, Fulfillment};

/// Per-request, per-field accumulator: the deduplicated, insertion-ordered
/// parents awaiting a single batched invocation, with one fulfillment sender
/// per distinct parent.
pub(crate) struct BatchSlot {
    key: FieldKey,
    parents: Vec<ResolvedValue>,
    senders: Vec<oneshot::Sender<Fulfillment>>,
    handles: Vec<DeferredHandle>,
    state: SlotState,
}

/// Slots only move forward; a fired slot is never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SlotState {
    Open,
    Firing,
    Closed,
}

impl BatchSlot {
    pub(crate) fn new(key: FieldKey) -> Self {
        Self {
            key,
            parents: Vec::new(),
            senders: Vec::new(),
            handles: Vec::new(),
            state: SlotState::Open,
        }
    }

    pub(crate) fn key(&self) -> &FieldKey {
        &self.key
    }

    pub(crate) fn state(&self) -> SlotState {
        self.state
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// Appends the parent and returns its handle. An equal parent already
    /// enqueued returns the existing handle instead, so the batched resolver
    /// sees each parent at most once.
    pub(crate) fn enqueue(&mut self, parent: ResolvedValue, equality: &ParentEquality) -> DeferredHandle {
        debug_assert!(self.state == SlotState::Open, "enqueue on a slot that already fired");

        if let Some(position) = self.parents.iter().position(|known| equality.are_equal(known, &parent)) {
            return self.handles[position].clone();
        }

        let (sender, handle) = DeferredHandle::new();
        self.parents.push(parent);
        self.senders.push(sender);
        self.handles.push(handle.clone());
        handle
    }

    /// Snapshots the accumulated parents and their senders, transitioning the
    /// slot to Firing. Subsequent enqueues for the same key go to a fresh slot.
    pub(crate) fn begin_firing(&mut self) -> (Vec<ResolvedValue>, Vec<oneshot::Sender<Fulfillment>>) {
        self.state = SlotState::Firing;
        self.handles.clear();
        (std::mem::take(&mut self.parents), std::mem::take(&mut self.senders))
    }

    pub(crate) fn close(&mut self) {
        self.state = SlotState::Closed;
    }
}
