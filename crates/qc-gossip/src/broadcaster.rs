//! # Broadcaster (spec §4.6)
//!
//! Floods a message to every configured peer. Per-peer failures are
//! isolated — logged and skipped — and the broadcaster never retries or
//! batches. This must never hold a queue or chain lock across a peer
//! call (spec §5); callers pass owned/cloned values in, not lock guards.

use crate::transport::PeerTransport;
use shared_types::{Block, OpMsg};
use tracing::warn;

pub struct Broadcaster<T: PeerTransport> {
    peer_addrs: Vec<String>,
    transport: T,
}

impl<T: PeerTransport> Broadcaster<T> {
    pub fn new(peer_addrs: Vec<String>, transport: T) -> Self {
        Self {
            peer_addrs,
            transport,
        }
    }

    pub async fn broadcast_operation(&self, op: &OpMsg) {
        for addr in &self.peer_addrs {
            if let Err(e) = self.transport.flood_operation(addr, op).await {
                warn!(peer = %addr, error = %e, "flood_operation failed, skipping peer");
            }
        }
    }

    pub async fn broadcast_block(&self, block: &Block) {
        for addr in &self.peer_addrs {
            if let Err(e) = self.transport.flood_block(addr, block).await {
                warn!(peer = %addr, error = %e, "flood_block failed, skipping peer");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::GossipError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingTransport {
        ops_sent: Arc<AtomicUsize>,
        fail_addr: Option<String>,
    }

    #[async_trait]
    impl PeerTransport for CountingTransport {
        async fn flood_operation(&self, addr: &str, _op: &OpMsg) -> Result<(), GossipError> {
            if self.fail_addr.as_deref() == Some(addr) {
                return Err(GossipError::Timeout {
                    addr: addr.to_string(),
                });
            }
            self.ops_sent.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn flood_block(&self, _addr: &str, _block: &Block) -> Result<(), GossipError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn one_failing_peer_does_not_stop_the_rest() {
        let ops_sent = Arc::new(AtomicUsize::new(0));
        let broadcaster = Broadcaster::new(
            vec!["peer-a".to_string(), "peer-b".to_string(), "peer-c".to_string()],
            CountingTransport {
                ops_sent: ops_sent.clone(),
                fail_addr: Some("peer-b".to_string()),
            },
        );
        broadcaster
            .broadcast_operation(&OpMsg::noop("M1".to_string()))
            .await;
        assert_eq!(ops_sent.load(Ordering::SeqCst), 2);
    }
}
