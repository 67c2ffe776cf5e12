//! # Core Domain Entities
//!
//! Defines the operation, block, and chain-adjacent entities shared by every
//! subsystem: the gossip layer, the pending-operation queues, the miner, and
//! the client gateway all exchange these types.

use serde::{Deserialize, Serialize};

/// Fixed size of one record slot within a file.
pub const RECORD_SIZE: usize = 512;

/// Maximum number of records a single file may hold (spec §4.7).
pub const MAX_RECORDS_PER_FILE: usize = 65_535;

/// The originating peer's short identity string.
pub type MinerId = String;

/// Discriminator for a client-initiated operation.
///
/// `NoOp` never originates from a client; it is the synthetic marker the
/// miner mines into a block when the pending queue is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpKind {
    CreateFile,
    AppendRec,
    NoOp,
}

impl OpKind {
    /// The literal token used in the `{,}`-joined transactions encoding.
    pub fn wire_token(self) -> &'static str {
        match self {
            OpKind::CreateFile => "CreateFile",
            OpKind::AppendRec => "AppendRec",
            OpKind::NoOp => "No-Op",
        }
    }

    pub fn from_wire_token(token: &str) -> Option<Self> {
        match token {
            "CreateFile" => Some(OpKind::CreateFile),
            "AppendRec" => Some(OpKind::AppendRec),
            "No-Op" => Some(OpKind::NoOp),
            _ => None,
        }
    }
}

/// A single client-initiated action, identified globally by
/// `(originator_id, sequence_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpMsg {
    pub originator_id: MinerId,
    pub sequence_id: u64,
    pub op: OpKind,
    pub name: String,
    pub content: Vec<u8>,
}

impl OpMsg {
    /// The flood-dedup key: `(originator_id, sequence_id)` uniquely
    /// identifies an operation across the network (spec §3 invariant).
    pub fn dedup_key(&self) -> (MinerId, u64) {
        (self.originator_id.clone(), self.sequence_id)
    }

    /// Builds the synthetic marker mined into a block when the pending
    /// queue is empty.
    pub fn noop(originator_id: MinerId) -> Self {
        Self {
            originator_id,
            sequence_id: 0,
            op: OpKind::NoOp,
            name: String::new(),
            content: Vec::new(),
        }
    }
}

/// A sealed batch of operations plus chain linkage fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Hex hash of the previous block, or empty for genesis.
    pub prev_hash: String,
    /// Position in the chain; genesis is 0.
    pub index: u64,
    /// Nanoseconds since the Unix epoch.
    pub timestamp: i64,
    pub nonce: u32,
    pub transactions: Vec<OpMsg>,
}

impl Block {
    /// The genesis block: empty `prev_hash`, `nonce = 0`, no transactions.
    pub fn genesis(genesis_prev_hash: String) -> Self {
        Self {
            prev_hash: genesis_prev_hash,
            index: 0,
            timestamp: 0,
            nonce: 0,
            transactions: Vec::new(),
        }
    }

    /// The block-inbox dedup key: `(prev_hash, nonce)` (spec §4.2).
    pub fn dedup_key(&self) -> (String, u32) {
        (self.prev_hash.clone(), self.nonce)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn op_kind_round_trips_through_wire_tokens() {
        for kind in [OpKind::CreateFile, OpKind::AppendRec, OpKind::NoOp] {
            let token = kind.wire_token();
            assert_eq!(OpKind::from_wire_token(token), Some(kind));
        }
        assert_eq!(OpKind::from_wire_token("bogus"), None);
    }

    #[test]
    fn genesis_block_has_expected_shape() {
        let g = Block::genesis(String::new());
        assert_eq!(g.index, 0);
        assert_eq!(g.nonce, 0);
        assert!(g.prev_hash.is_empty());
        assert!(g.transactions.is_empty());
    }
}
