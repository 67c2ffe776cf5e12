//! # PendingOps queue (spec §4.2)
//!
//! FIFO of operation messages awaiting inclusion, with a sidecar "seen"
//! set (the dequeued trash plus the live queue) to suppress gossip loops.
//! The check-then-enqueue pair is performed under a single lock so
//! concurrent floods cannot both observe "not seen" and double-enqueue
//! (spec §5, "Shared-resource policy").

use crate::seen::SeenSet;
use parking_lot::Mutex;
use shared_types::OpMsg;
use std::collections::{HashSet, VecDeque};
use tracing::debug;

/// Default bound on the dequeued-trash seen set (spec §9).
pub const DEFAULT_TRASH_CAPACITY: usize = 100_000;

type DedupKey = (String, u64);

struct Inner {
    queue: VecDeque<OpMsg>,
    queue_keys: HashSet<DedupKey>,
    trash: SeenSet<DedupKey>,
}

pub struct PendingOps {
    inner: Mutex<Inner>,
}

impl PendingOps {
    pub fn new() -> Self {
        Self::with_trash_capacity(DEFAULT_TRASH_CAPACITY)
    }

    pub fn with_trash_capacity(trash_capacity: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                queue: VecDeque::new(),
                queue_keys: HashSet::new(),
                trash: SeenSet::new(trash_capacity),
            }),
        }
    }

    /// Enqueues `op` if its `(originator_id, sequence_id)` has not already
    /// been seen in the live queue or the trash. Returns `true` if it was
    /// newly enqueued (spec §8 property 4, "Flood idempotence").
    pub fn enqueue_if_new(&self, op: OpMsg) -> bool {
        let mut inner = self.inner.lock();
        let key = op.dedup_key();
        if inner.queue_keys.contains(&key) || inner.trash.contains(&key) {
            debug!(originator = %key.0, sequence_id = key.1, "duplicate operation dropped");
            return false;
        }
        inner.queue_keys.insert(key);
        inner.queue.push_back(op);
        true
    }

    /// True if `key` has already been seen (live queue or trash), without
    /// mutating anything. Useful for a read-only dedup probe.
    pub fn has_seen(&self, key: &DedupKey) -> bool {
        let inner = self.inner.lock();
        inner.queue_keys.contains(key) || inner.trash.contains(key)
    }

    /// Drains up to `max` operations from the front of the queue, in FIFO
    /// order, moving each into the trash (spec §4.2).
    pub fn drain_up_to(&self, max: usize) -> Vec<OpMsg> {
        let mut inner = self.inner.lock();
        let n = max.min(inner.queue.len());
        let mut drained = Vec::with_capacity(n);
        for _ in 0..n {
            if let Some(op) = inner.queue.pop_front() {
                let key = op.dedup_key();
                inner.queue_keys.remove(&key);
                inner.trash.insert(key);
                drained.push(op);
            }
        }
        drained
    }

    pub fn len(&self) -> usize {
        self.inner.lock().queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for PendingOps {
    fn default() -> Self {
        Self::new()
    }
}
