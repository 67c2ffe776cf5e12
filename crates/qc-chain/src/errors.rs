//! Chain validation failures (spec §4.3). All are non-fatal: the invalid
//! block is dropped and logged, never propagated as a process error.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChainError {
    #[error("prev_hash {got:?} does not match tip hash {want:?}")]
    PrevHashMismatch { got: String, want: String },

    #[error("hash {hash:?} does not end with {difficulty} trailing zeros")]
    InsufficientProofOfWork { hash: String, difficulty: usize },

    #[error("transactions payload is malformed: {0}")]
    MalformedTransactions(String),
}
