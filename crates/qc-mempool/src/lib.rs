//! # Mempool Crate
//!
//! The pending-operation and block-inbox FIFOs, each paired with a
//! dedup "seen" set that is the sole mechanism terminating gossip
//! flooding over a possibly cyclic peer graph (spec §4.2, §9).

pub mod block_inbox;
pub mod pending_ops;
pub mod seen;

pub use block_inbox::BlockInbox;
pub use pending_ops::PendingOps;
