//! # Block production loop (spec §4.4)
//!
//! A ticker fires at a configured interval. On each tick, the producer
//! either drains up to `max_records_per_block` ops from `PendingOps` in
//! FIFO order, or — if the queue is empty — assembles a single synthetic
//! `NoOp` op. The candidate is mined and, on success, appended locally
//! and broadcast to every peer.
//!
//! There is no tie-breaking on concurrent production (spec §4.4): two
//! miners producing at the same tip simply race, and whichever block a
//! given node sees first wins; the other is dropped by `Chain::append`.

use crate::pow::{mine, now_ns};
use qc_chain::Chain;
use qc_gossip::{Broadcaster, PeerTransport};
use qc_mempool::PendingOps;
use shared_types::{Block, MinerId, OpMsg};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::info;

/// Builds the unmined candidate block for this tick: a `NoOp` block if
/// the pending queue is empty, otherwise a transaction block draining up
/// to `max_records` ops.
fn assemble_candidate(
    miner_id: &MinerId,
    pending: &PendingOps,
    chain: &Chain,
    max_records: usize,
) -> Block {
    let transactions = if pending.is_empty() {
        vec![OpMsg::noop(miner_id.clone())]
    } else {
        pending.drain_up_to(max_records)
    };
    Block {
        prev_hash: chain.tip_hash(),
        index: chain.len() as u64,
        timestamp: now_ns(),
        nonce: 0,
        transactions,
    }
}

/// Spawns the periodic block-production task. Mining runs on a blocking
/// task so a slow search cannot stall the tokio runtime (spec §5,
/// "Ticker callbacks ... may perform long-running CPU work").
pub fn spawn_block_producer<T: PeerTransport + 'static>(
    miner_id: MinerId,
    interval: Duration,
    max_records: usize,
    chain: Arc<Chain>,
    pending: Arc<PendingOps>,
    broadcaster: Arc<Broadcaster<T>>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            let candidate = assemble_candidate(&miner_id, &pending, &chain, max_records);
            let difficulty = chain.difficulty();
            let mined = tokio::task::spawn_blocking(move || mine(candidate, difficulty))
                .await
                .expect("mining task panicked");
            if chain.append(mined.clone()).is_ok() {
                info!(index = mined.index, nonce = mined.nonce, "block mined and appended");
                broadcaster.broadcast_block(&mined).await;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::OpKind;

    #[test]
    fn assembles_noop_when_pending_is_empty() {
        let chain = Chain::new(String::new());
        let pending = PendingOps::new();
        let block = assemble_candidate(&"M1".to_string(), &pending, &chain, 2);
        assert_eq!(block.transactions.len(), 1);
        assert_eq!(block.transactions[0].op, OpKind::NoOp);
        assert_eq!(block.transactions[0].originator_id, "M1");
    }

    #[test]
    fn assembles_transaction_block_draining_up_to_max_records() {
        let chain = Chain::new(String::new());
        let pending = PendingOps::new();
        for seq in 0..5 {
            pending.enqueue_if_new(OpMsg {
                originator_id: "M1".to_string(),
                sequence_id: seq,
                op: OpKind::CreateFile,
                name: format!("f{seq}"),
                content: Vec::new(),
            });
        }
        let block = assemble_candidate(&"M1".to_string(), &pending, &chain, 2);
        assert_eq!(block.transactions.len(), 2);
        assert_eq!(pending.len(), 3);
        assert_eq!(block.prev_hash, chain.tip_hash());
        assert_eq!(block.index, 1);
    }
}
