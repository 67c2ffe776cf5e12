//! # BlockInbox queue (spec §4.2)
//!
//! FIFO of blocks received from peers that passed dedup. The suppression
//! key is `(prev_hash, nonce)`; a block whose key is already in the
//! inbox is dropped. The source does not check the live chain for this
//! key, and neither does this port (spec §9: that is a documented,
//! faithfully-preserved weakness, not a bug to silently fix).

use parking_lot::Mutex;
use shared_types::Block;
use std::collections::{HashSet, VecDeque};
use tracing::debug;

type DedupKey = (String, u32);

struct Inner {
    queue: VecDeque<Block>,
    keys: HashSet<DedupKey>,
}

pub struct BlockInbox {
    inner: Mutex<Inner>,
}

impl BlockInbox {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                queue: VecDeque::new(),
                keys: HashSet::new(),
            }),
        }
    }

    /// Enqueues `block` if its `(prev_hash, nonce)` is not already present
    /// in the live inbox. Returns `true` if newly enqueued.
    pub fn enqueue_if_new(&self, block: Block) -> bool {
        let mut inner = self.inner.lock();
        let key = block.dedup_key();
        if inner.keys.contains(&key) {
            debug!(nonce = key.1, "duplicate block dropped");
            return false;
        }
        inner.keys.insert(key);
        inner.queue.push_back(block);
        true
    }

    /// As `enqueue_if_new`, but a block with an empty transactions payload
    /// is neither enqueued nor marked seen (spec §4.6, `FloodBlock`
    /// handler: "if new and its transactions payload is non-empty").
    pub fn enqueue_if_new_nonempty(&self, block: Block) -> bool {
        if block.transactions.is_empty() {
            return false;
        }
        self.enqueue_if_new(block)
    }

    /// Pops the oldest block, if any. Production code never drains the
    /// inbox this way — `handle_flood_block` appends straight to the chain
    /// and leaves accepted blocks queued, matching the original's
    /// `blockQueue` (spec §9: its growth is an accepted, documented
    /// tradeoff, not a bug). This exists for tests and diagnostics.
    pub fn dequeue(&self) -> Option<Block> {
        let mut inner = self.inner.lock();
        let block = inner.queue.pop_front();
        if let Some(ref b) = block {
            inner.keys.remove(&b.dedup_key());
        }
        block
    }

    pub fn len(&self) -> usize {
        self.inner.lock().queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for BlockInbox {
    fn default() -> Self {
        Self::new()
    }
}
