//! Peer transient errors (spec §7). All are per-peer, logged, and skipped;
//! the broadcaster always continues to the next peer.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GossipError {
    #[error("dialing {addr}: {source}")]
    Dial {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("call to {addr} failed: {source}")]
    Call {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("call to {addr} timed out")]
    Timeout { addr: String },
    #[error("malformed peer message: {0}")]
    Malformed(String),
}
