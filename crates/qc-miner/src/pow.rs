//! # Proof-of-work search (spec §4.4, §9)
//!
//! Iterates the nonce until `hex(hash(block))` ends with `difficulty`
//! trailing zeros. The search is bounded by the 32-bit nonce space; on
//! exhaustion this refreshes the timestamp and restarts rather than
//! looping forever on an unlucky prefix (spec §9, "PoW nonce
//! exhaustion"). Property §8(2) still holds because the canonical
//! encoding includes the timestamp.

use qc_chain::{hash_block, satisfies_difficulty};
use shared_types::Block;

/// Returns the current time in nanoseconds since the Unix epoch.
pub fn now_ns() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("system clock is before the Unix epoch")
        .as_nanos() as i64
}

/// The next `(nonce, timestamp)` pair to try: increment the nonce, or on
/// 32-bit wraparound reset it to zero and refresh the timestamp via
/// `clock`.
fn advance(nonce: u32, timestamp: i64, clock: &impl Fn() -> i64) -> (u32, i64) {
    if nonce == u32::MAX {
        (0, clock())
    } else {
        (nonce + 1, timestamp)
    }
}

/// Mines `block` in place: searches for a nonce (refreshing the
/// timestamp and restarting on 32-bit nonce exhaustion) such that the
/// block's hash satisfies `difficulty`. `clock` supplies the timestamp
/// used on each restart, so tests can run without wall-clock jitter.
pub fn mine_with_clock(mut block: Block, difficulty: usize, clock: impl Fn() -> i64) -> Block {
    loop {
        let hash = hash_block(&block);
        if satisfies_difficulty(&hash, difficulty) {
            return block;
        }
        let (nonce, timestamp) = advance(block.nonce, block.timestamp, &clock);
        block.nonce = nonce;
        block.timestamp = timestamp;
    }
}

/// Mines `block` using the wall clock for timestamp refreshes.
pub fn mine(block: Block, difficulty: usize) -> Block {
    mine_with_clock(block, difficulty, now_ns)
}
