//! # Canonical Block Encoding and Hashing (spec §4.1)
//!
//! The canonical encoding of a block for hashing is the concatenation, in
//! order, of the byte representations of: `prev_hash` (ASCII), decimal
//! `index`, decimal `timestamp`, decimal `nonce`, and the transactions
//! payload as encoded for the wire. No separator bytes are inserted. The
//! hash is MD5, rendered as lowercase hex.
//!
//! MD5 is adequate here — collision resistance is not relied on for
//! security, only for a difficulty-tunable search problem — so this
//! module is the one place in the workspace an MD5 dependency is
//! justified.

use md5::{Digest, Md5};
use shared_types::wire::encode_transactions;
use shared_types::Block;

/// Builds the exact byte sequence that gets hashed for a block. Every peer
/// must reproduce this bit-for-bit; it is part of the wire contract.
pub fn canonical_bytes(block: &Block) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(block.prev_hash.as_bytes());
    buf.extend_from_slice(block.index.to_string().as_bytes());
    buf.extend_from_slice(block.timestamp.to_string().as_bytes());
    buf.extend_from_slice(block.nonce.to_string().as_bytes());
    buf.extend_from_slice(encode_transactions(&block.transactions).as_bytes());
    buf
}

/// Lowercase hex MD5 digest of a block's canonical encoding.
pub fn hash_block(block: &Block) -> String {
    let mut hasher = Md5::new();
    hasher.update(canonical_bytes(block));
    hex::encode(hasher.finalize())
}

/// True if `hash` ends with `difficulty` consecutive `'0'` characters.
pub fn satisfies_difficulty(hash: &str, difficulty: usize) -> bool {
    if difficulty == 0 {
        return true;
    }
    hash.len() >= difficulty && hash[hash.len() - difficulty..].bytes().all(|b| b == b'0')
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::OpMsg;

    #[test]
    fn genesis_hash_is_deterministic() {
        let genesis = Block::genesis(String::new());
        let h1 = hash_block(&genesis);
        let h2 = hash_block(&genesis);
        assert_eq!(h1, h2);
        assert_eq!(h1.len(), 32);
    }

    #[test]
    fn canonical_encoding_has_no_separators() {
        let block = Block {
            prev_hash: "abc".to_string(),
            index: 1,
            timestamp: 42,
            nonce: 7,
            transactions: Vec::new(),
        };
        assert_eq!(canonical_bytes(&block), b"abc1427".to_vec());
    }

    #[test]
    fn changing_transactions_changes_the_hash() {
        let mut block = Block {
            prev_hash: "abc".to_string(),
            index: 1,
            timestamp: 42,
            nonce: 0,
            transactions: Vec::new(),
        };
        let h_empty = hash_block(&block);
        block.transactions.push(OpMsg::noop("M1".to_string()));
        let h_noop = hash_block(&block);
        assert_ne!(h_empty, h_noop);
    }

    #[test]
    fn difficulty_zero_is_always_satisfied() {
        assert!(satisfies_difficulty("deadbeef", 0));
    }

    #[test]
    fn difficulty_checks_trailing_zero_run() {
        assert!(satisfies_difficulty("deadbe00", 2));
        assert!(!satisfies_difficulty("deadbe01", 2));
        assert!(!satisfies_difficulty("0", 2));
    }
}
