//! # Peer RPC envelope (spec §6)
//!
//! Two procedures, each carrying one structured value: `FloodOperation`
//! and `FloodBlock`. A block's `transactions` travel the wire as the one
//! string described in spec §6, not as the structured `OpMsg` sequence
//! used internally — `BlockWire` is that on-wire shape.

use serde::{Deserialize, Serialize};
use shared_types::wire::{decode_transactions, encode_transactions, WireError};
use shared_types::{Block, OpMsg};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockWire {
    pub prev_hash: String,
    pub index: u64,
    pub timestamp: i64,
    pub nonce: u32,
    pub transactions: String,
}

impl From<&Block> for BlockWire {
    fn from(block: &Block) -> Self {
        Self {
            prev_hash: block.prev_hash.clone(),
            index: block.index,
            timestamp: block.timestamp,
            nonce: block.nonce,
            transactions: encode_transactions(&block.transactions),
        }
    }
}

impl BlockWire {
    pub fn into_block(self) -> Result<Block, WireError> {
        Ok(Block {
            prev_hash: self.prev_hash,
            index: self.index,
            timestamp: self.timestamp,
            nonce: self.nonce,
            transactions: decode_transactions(&self.transactions)?,
        })
    }
}

/// The two peer RPC procedures (spec §6).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", content = "params")]
pub enum PeerRequest {
    FloodOperation(OpMsg),
    FloodBlock(BlockWire),
}

/// Peer RPC reply: a small integer, 0 on accept (spec §6).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PeerReply {
    pub code: i32,
}

impl PeerReply {
    pub const ACCEPT: PeerReply = PeerReply { code: 0 };
}
