//! # Peer RPC server (spec §4.6, §6)
//!
//! Accepts one TCP connection per inbound peer call, decodes a single
//! newline-delimited JSON `PeerRequest`, dispatches it to the matching
//! inbound handler, and writes back a `PeerReply`. A bind failure here
//! is fatal at startup (spec §7); everything after bind succeeds is
//! non-fatal and recovered per-connection.

use crate::broadcaster::Broadcaster;
use crate::handlers::{handle_flood_block, handle_flood_operation};
use crate::transport::PeerTransport;
use crate::wire::{PeerReply, PeerRequest};
use qc_chain::Chain;
use qc_mempool::{BlockInbox, PendingOps};
use std::io;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tracing::{info, warn};

pub struct PeerServerState<T: PeerTransport> {
    pub pending: Arc<PendingOps>,
    pub inbox: Arc<BlockInbox>,
    pub chain: Arc<Chain>,
    pub broadcaster: Arc<Broadcaster<T>>,
}

/// Binds `addr` and spawns the accept loop. Binding happens before this
/// function returns so a bind failure can abort the process at startup.
pub async fn spawn_peer_server<T: PeerTransport + 'static>(
    addr: &str,
    state: Arc<PeerServerState<T>>,
) -> io::Result<JoinHandle<()>> {
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "peer server listening");
    Ok(tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((stream, peer_addr)) => {
                    let state = state.clone();
                    tokio::spawn(async move {
                        if let Err(e) = serve_connection(stream, &state).await {
                            warn!(peer = %peer_addr, error = %e, "peer connection ended with error");
                        }
                    });
                }
                Err(e) => {
                    warn!(error = %e, "peer accept failed");
                }
            }
        }
    }))
}

async fn serve_connection<T: PeerTransport>(
    stream: TcpStream,
    state: &PeerServerState<T>,
) -> io::Result<()> {
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);
    let mut line = String::new();
    loop {
        line.clear();
        let bytes_read = reader.read_line(&mut line).await?;
        if bytes_read == 0 {
            return Ok(());
        }
        let reply = match serde_json::from_str::<PeerRequest>(line.trim()) {
            Ok(request) => {
                dispatch(request, state).await;
                PeerReply::ACCEPT
            }
            Err(e) => {
                warn!(error = %e, "malformed peer request, ignoring");
                PeerReply { code: 1 }
            }
        };
        let mut out = serde_json::to_string(&reply).unwrap_or_else(|_| "{\"code\":1}".to_string());
        out.push('\n');
        write_half.write_all(out.as_bytes()).await?;
    }
}

async fn dispatch<T: PeerTransport>(request: PeerRequest, state: &PeerServerState<T>) {
    match request {
        PeerRequest::FloodOperation(op) => {
            handle_flood_operation(op, &state.pending, &state.broadcaster).await;
        }
        PeerRequest::FloodBlock(wire_block) => match wire_block.into_block() {
            Ok(block) => {
                handle_flood_block(block, &state.inbox, &state.chain, &state.broadcaster).await;
            }
            Err(e) => {
                warn!(error = %e, "malformed block transactions payload, dropping");
            }
        },
    }
}
