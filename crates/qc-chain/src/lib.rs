//! # Chain Crate
//!
//! Block hashing, the replicated chain with its validator, and the
//! periodic difficulty controller (spec §4.1, §4.3, §4.5).

pub mod chain;
pub mod difficulty;
pub mod errors;
pub mod hash;

pub use chain::Chain;
pub use difficulty::spawn_difficulty_controller;
pub use errors::ChainError;
pub use hash::{canonical_bytes, hash_block, satisfies_difficulty};
