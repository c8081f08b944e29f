//! Storage seam for bucket state

use crate::{BucketState, Result, Verdict};

/// A computed transition for one bucket slot
#[derive(Debug, Clone, Copy)]
pub struct SlotDecision {
    /// State to persist back into the slot
    pub state:   BucketState,
    /// Verdict to hand back to the caller
    pub verdict: Verdict,
}

/// Transition function applied to a slot's current state.
///
/// Receives `None` when the slot is empty or its contents are unreadable.
pub type SlotApply = Box<dyn FnOnce(Option<BucketState>) -> SlotDecision + Send>;

/// Exclusive read-compute-write access to named bucket slots.
///
/// For a given key the whole acquire-read-apply-write-release cycle must be
/// mutually exclusive with every other `update` on the same key, across
/// threads and, where the backing medium allows it, across processes. The
/// token-bucket arithmetic never touches storage directly, so swapping the
/// file-backed slots for a database table is a matter of implementing this
/// trait.
#[async_trait::async_trait]
pub trait StateSlots: Send + Sync {
    /// Runs one exclusive update cycle against the slot for `key`.
    async fn update(&self, key: &str, apply: SlotApply) -> Result<Verdict>;
}
