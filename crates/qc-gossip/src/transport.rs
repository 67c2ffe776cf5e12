//! # Peer transport (spec §4.6, §5)
//!
//! Outbound peer calls are synchronous remote invocations: dial, send one
//! request, read one reply. Peers have no persistent connection — a new
//! TCP connection is dialed per call, mirroring the original's
//! `rpc.DialHTTP` per broadcast. A connect+call timeout is imposed
//! because the spec notes none is given upstream and an unbounded call
//! could wedge a broadcaster task (spec §5, "Cancellation & timeouts").

use crate::errors::GossipError;
use crate::wire::{PeerReply, PeerRequest};
use async_trait::async_trait;
use shared_types::{Block, OpMsg};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::time::timeout;

/// The outbound side of peer gossip: one call per flooded message.
#[async_trait]
pub trait PeerTransport: Send + Sync {
    async fn flood_operation(&self, addr: &str, op: &OpMsg) -> Result<(), GossipError>;
    async fn flood_block(&self, addr: &str, block: &Block) -> Result<(), GossipError>;
}

/// Dials a fresh TCP connection per call and exchanges one newline-
/// delimited JSON request/reply pair.
pub struct TcpPeerTransport {
    call_timeout: Duration,
}

impl TcpPeerTransport {
    pub fn new(call_timeout: Duration) -> Self {
        Self { call_timeout }
    }

    async fn call(&self, addr: &str, request: &PeerRequest) -> Result<PeerReply, GossipError> {
        timeout(self.call_timeout, self.call_inner(addr, request))
            .await
            .map_err(|_| GossipError::Timeout {
                addr: addr.to_string(),
            })?
    }

    async fn call_inner(&self, addr: &str, request: &PeerRequest) -> Result<PeerReply, GossipError> {
        let mut stream = TcpStream::connect(addr)
            .await
            .map_err(|source| GossipError::Dial {
                addr: addr.to_string(),
                source,
            })?;

        let mut line = serde_json::to_string(request)
            .map_err(|e| GossipError::Malformed(e.to_string()))?;
        line.push('\n');
        stream
            .write_all(line.as_bytes())
            .await
            .map_err(|source| GossipError::Call {
                addr: addr.to_string(),
                source,
            })?;

        let mut reader = BufReader::new(stream);
        let mut reply_line = String::new();
        reader
            .read_line(&mut reply_line)
            .await
            .map_err(|source| GossipError::Call {
                addr: addr.to_string(),
                source,
            })?;

        serde_json::from_str(reply_line.trim())
            .map_err(|e| GossipError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl PeerTransport for TcpPeerTransport {
    async fn flood_operation(&self, addr: &str, op: &OpMsg) -> Result<(), GossipError> {
        self.call(addr, &PeerRequest::FloodOperation(op.clone()))
            .await?;
        Ok(())
    }

    async fn flood_block(&self, addr: &str, block: &Block) -> Result<(), GossipError> {
        self.call(addr, &PeerRequest::FloodBlock(block.into()))
            .await?;
        Ok(())
    }
}
