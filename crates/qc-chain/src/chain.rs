//! # Chain (spec §3, §4.3)
//!
//! Ordered sequence of blocks guarded by a single exclusive lock. Only
//! extension at the tip is permitted — no forks, no reorg (spec §9,
//! "Concurrent chain extension": this specification fixes that policy to
//! remain faithful to the original).

use crate::errors::ChainError;
use crate::hash::{hash_block, satisfies_difficulty};
use parking_lot::Mutex;
use shared_types::{Block, OpKind};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{info, warn};

pub struct Chain {
    blocks: Mutex<Vec<Block>>,
    difficulty: AtomicUsize,
}

impl Chain {
    /// Seeds the chain with the genesis block. Starting difficulty is 1,
    /// matching the original's `Initial()`.
    pub fn new(genesis_prev_hash: String) -> Self {
        Self {
            blocks: Mutex::new(vec![Block::genesis(genesis_prev_hash)]),
            difficulty: AtomicUsize::new(1),
        }
    }

    /// A clone of the last block. Never blocks for long: the lock is held
    /// only long enough to clone.
    pub fn tip(&self) -> Block {
        self.blocks.lock().last().expect("chain always has a genesis block").clone()
    }

    pub fn tip_hash(&self) -> String {
        hash_block(&self.tip())
    }

    pub fn len(&self) -> usize {
        self.blocks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn difficulty(&self) -> usize {
        self.difficulty.load(Ordering::Acquire)
    }

    /// Sets the difficulty field atomically. Subsequent PoW searches and
    /// validations observe the new value (spec §4.5).
    pub fn set_difficulty(&self, new_difficulty: usize) {
        self.difficulty.store(new_difficulty, Ordering::Release);
    }

    /// Validates `block` against the current tip under the given
    /// difficulty (spec §4.3 "Validation of a candidate block").
    fn validate(&self, block: &Block, tip_hash: &str, difficulty: usize) -> Result<(), ChainError> {
        if block.prev_hash != tip_hash {
            return Err(ChainError::PrevHashMismatch {
                got: block.prev_hash.clone(),
                want: tip_hash.to_string(),
            });
        }
        let hash = hash_block(block);
        if !satisfies_difficulty(&hash, difficulty) {
            return Err(ChainError::InsufficientProofOfWork { hash, difficulty });
        }
        validate_transactions_well_formed(block)?;
        Ok(())
    }

    /// Validates and, on success, appends `block` to the chain. On
    /// failure the block is dropped and logged (spec §4.3, "Failure
    /// policy"); the miner does not request a re-sync.
    pub fn append(&self, block: Block) -> Result<(), ChainError> {
        let difficulty = self.difficulty();
        let mut blocks = self.blocks.lock();
        let tip_hash = hash_block(blocks.last().expect("chain always has a genesis block"));
        match self.validate(&block, &tip_hash, difficulty) {
            Ok(()) => {
                info!(index = block.index, "chain extended");
                blocks.push(block);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "dropping invalid block");
                Err(e)
            }
        }
    }

    /// Every filename ever created in the chain's transactions, in chain
    /// order (spec §4.3). `AppendRec` and `NoOp` entries contribute
    /// nothing, matching the original's `getFileNames`.
    pub fn file_names(&self) -> Vec<String> {
        let blocks = self.blocks.lock();
        blocks
            .iter()
            .flat_map(|b| b.transactions.iter())
            .filter(|op| op.op == OpKind::CreateFile)
            .map(|op| op.name.clone())
            .collect()
    }
}

/// A strengthened well-formedness check: every op's fields are consistent
/// with its discriminator (spec §9, "Transaction validity in
/// `verifyBlock`"). Filesystem-state preconditions are not re-checked
/// here because ops are pre-validated at client ingest.
fn validate_transactions_well_formed(block: &Block) -> Result<(), ChainError> {
    for op in &block.transactions {
        match op.op {
            OpKind::NoOp => {
                if !op.name.is_empty() || !op.content.is_empty() {
                    return Err(ChainError::MalformedTransactions(
                        "NoOp must carry an empty name and content".to_string(),
                    ));
                }
            }
            OpKind::CreateFile | OpKind::AppendRec => {
                if op.name.is_empty() {
                    return Err(ChainError::MalformedTransactions(
                        "CreateFile/AppendRec must carry a non-empty name".to_string(),
                    ));
                }
            }
        }
    }
    Ok(())
}
