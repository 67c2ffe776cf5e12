//! # Inbound flood handlers (spec §4.6)
//!
//! - `FloodOperation(op)`: consult the dedup set; if new, enqueue into
//!   `PendingOps` and re-broadcast to all peers.
//! - `FloodBlock(block)`: consult the `BlockInbox` dedup; if new and its
//!   transactions payload is non-empty, enqueue into `BlockInbox`,
//!   attempt chain append, and re-broadcast.
//!
//! Because every node drops duplicates, each message traverses at most
//! `|edges|` hops and terminates (spec §8 property 5).

use crate::broadcaster::Broadcaster;
use crate::transport::PeerTransport;
use qc_chain::Chain;
use qc_mempool::{BlockInbox, PendingOps};
use shared_types::{Block, OpMsg};
use tracing::debug;

pub async fn handle_flood_operation<T: PeerTransport>(
    op: OpMsg,
    pending: &PendingOps,
    broadcaster: &Broadcaster<T>,
) {
    if pending.enqueue_if_new(op.clone()) {
        broadcaster.broadcast_operation(&op).await;
    } else {
        debug!(originator = %op.originator_id, sequence_id = op.sequence_id, "duplicate operation dropped");
    }
}

pub async fn handle_flood_block<T: PeerTransport>(
    block: Block,
    inbox: &BlockInbox,
    chain: &Chain,
    broadcaster: &Broadcaster<T>,
) {
    if inbox.enqueue_if_new_nonempty(block.clone()) {
        let _ = chain.append(block.clone());
        broadcaster.broadcast_block(&block).await;
    } else {
        debug!(nonce = block.nonce, "duplicate or empty block dropped");
    }
}
