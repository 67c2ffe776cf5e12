//! # Client gateway TCP server (spec §4.7, §6)
//!
//! One connection per client, line-oriented JSON requests in, raw-byte
//! responses out (not JSON-wrapped): a fixed string, a decimal integer, a
//! filename list, or exactly 512 bytes of record content. Every request
//! that mutates derived state is also wrapped into an `OpMsg`, enqueued
//! locally, and broadcast to peers — the same path a flooded op from a
//! remote client would take.

use crate::errors::GatewayError;
use crate::file_store::FileStore;
use crate::protocol::ClientRequest;
use qc_gossip::{Broadcaster, PeerTransport};
use qc_mempool::PendingOps;
use shared_types::{OpKind, OpMsg};
use std::io;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tracing::{info, warn};

pub struct GatewayState<T: PeerTransport> {
    pub miner_id: String,
    pub files: Arc<FileStore>,
    pub pending: Arc<PendingOps>,
    pub broadcaster: Arc<Broadcaster<T>>,
    next_sequence_id: AtomicU64,
}

impl<T: PeerTransport> GatewayState<T> {
    pub fn new(
        miner_id: String,
        files: Arc<FileStore>,
        pending: Arc<PendingOps>,
        broadcaster: Arc<Broadcaster<T>>,
    ) -> Self {
        Self {
            miner_id,
            files,
            pending,
            broadcaster,
            next_sequence_id: AtomicU64::new(1),
        }
    }

    /// Per-process monotonic counter (SPEC_FULL supplemented feature: the
    /// sequence id is not scoped to a file, it is scoped to this miner).
    fn next_sequence_id(&self) -> u64 {
        self.next_sequence_id.fetch_add(1, Ordering::Relaxed)
    }
}

/// Binds `addr` and spawns the accept loop; bind failure is fatal at
/// startup, mirroring the peer server (spec §7).
pub async fn spawn_client_server<T: PeerTransport + 'static>(
    addr: &str,
    state: Arc<GatewayState<T>>,
) -> io::Result<JoinHandle<()>> {
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "client gateway listening");
    Ok(tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((stream, peer_addr)) => {
                    let state = state.clone();
                    tokio::spawn(async move {
                        if let Err(e) = serve_connection(stream, &state).await {
                            warn!(peer = %peer_addr, error = %e, "client connection ended with error");
                        }
                    });
                }
                Err(e) => {
                    warn!(error = %e, "client accept failed");
                }
            }
        }
    }))
}

async fn serve_connection<T: PeerTransport>(
    stream: TcpStream,
    state: &GatewayState<T>,
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
        let response = match serde_json::from_str::<ClientRequest>(line.trim()) {
            Ok(request) => dispatch(request, state).await,
            Err(e) => {
                warn!(error = %e, "malformed client request");
                GatewayError::MalformedRequest.wire_message().as_bytes().to_vec()
            }
        };
        write_half.write_all(&response).await?;
    }
}

async fn dispatch<T: PeerTransport>(request: ClientRequest, state: &GatewayState<T>) -> Vec<u8> {
    match request.op.as_str() {
        "CreateFile" => match state.files.create_file(&request.name) {
            Ok(()) => {
                enqueue_and_broadcast(state, OpKind::CreateFile, request.name, Vec::new()).await;
                b"success".to_vec()
            }
            Err(e) => e.wire_message().as_bytes().to_vec(),
        },
        "ListFiles" => state.files.list_files().into_bytes(),
        "TotalRecs" => match state.files.total_recs(&request.name) {
            Ok(count) => count.to_string().into_bytes(),
            Err(e) => e.wire_message().as_bytes().to_vec(),
        },
        "ReadRec" => match request.content.trim().parse::<usize>() {
            Ok(pos) => match state.files.read_rec(&request.name, pos) {
                Ok(record) => record,
                Err(e) => e.wire_message().as_bytes().to_vec(),
            },
            Err(_) => GatewayError::InvalidPosition.wire_message().as_bytes().to_vec(),
        },
        "AppendRec" => match state
            .files
            .append_rec(&request.name, request.content.as_bytes())
        {
            Ok((index, record)) => {
                enqueue_and_broadcast(state, OpKind::AppendRec, request.name, record).await;
                index.to_string().into_bytes()
            }
            Err(e) => e.wire_message().as_bytes().to_vec(),
        },
        _ => GatewayError::MalformedRequest.wire_message().as_bytes().to_vec(),
    }
}

async fn enqueue_and_broadcast<T: PeerTransport>(
    state: &GatewayState<T>,
    op: OpKind,
    name: String,
    content: Vec<u8>,
) {
    let msg = OpMsg {
        originator_id: state.miner_id.clone(),
        sequence_id: state.next_sequence_id(),
        op,
        name,
        content,
    };
    if state.pending.enqueue_if_new(msg.clone()) {
        state.broadcaster.broadcast_operation(&msg).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use qc_gossip::GossipError;
    use shared_types::Block;
    use std::sync::atomic::AtomicUsize;

    #[derive(Default)]
    struct CountingTransport {
        ops: AtomicUsize,
    }

    #[async_trait]
    impl PeerTransport for CountingTransport {
        async fn flood_operation(&self, _addr: &str, _op: &OpMsg) -> Result<(), GossipError> {
            self.ops.fetch_add(1, Ordering::Relaxed);
            Ok(())
        }

        async fn flood_block(&self, _addr: &str, _block: &Block) -> Result<(), GossipError> {
            Ok(())
        }
    }

    fn state() -> GatewayState<CountingTransport> {
        GatewayState::new(
            "M1".to_string(),
            Arc::new(FileStore::new()),
            Arc::new(PendingOps::new()),
            Arc::new(Broadcaster::new(
                vec!["peer:1".to_string()],
                CountingTransport::default(),
            )),
        )
    }

    fn req(op: &str, name: &str, content: &str) -> ClientRequest {
        ClientRequest {
            op: op.to_string(),
            name: name.to_string(),
            content: content.to_string(),
        }
    }

    #[tokio::test]
    async fn create_file_enqueues_and_broadcasts() {
        let state = state();
        let response = dispatch(req("CreateFile", "f", ""), &state).await;
        assert_eq!(response, b"success");
        assert_eq!(state.pending.len(), 1);
    }

    #[tokio::test]
    async fn create_file_twice_returns_file_exists_error() {
        let state = state();
        dispatch(req("CreateFile", "f", ""), &state).await;
        let response = dispatch(req("CreateFile", "f", ""), &state).await;
        assert_eq!(response, b"FileExistsError");
        assert_eq!(state.pending.len(), 1);
    }

    #[tokio::test]
    async fn full_session_matches_scenario_s3() {
        let state = state();
        assert_eq!(dispatch(req("CreateFile", "f", ""), &state).await, b"success");
        assert_eq!(dispatch(req("TotalRecs", "f", ""), &state).await, b"0");
        assert_eq!(
            dispatch(req("AppendRec", "f", "hello"), &state).await,
            b"0"
        );
        let record = dispatch(req("ReadRec", "f", "0"), &state).await;
        assert_eq!(record.len(), 512);
        assert!(record.starts_with(b"hello"));
    }

    #[tokio::test]
    async fn read_rec_with_non_numeric_position_is_rejected() {
        let state = state();
        dispatch(req("CreateFile", "f", ""), &state).await;
        let response = dispatch(req("ReadRec", "f", "not-a-number"), &state).await;
        assert_eq!(response, b"InvalidPositionError");
    }

    #[tokio::test]
    async fn unknown_op_is_malformed() {
        let state = state();
        let response = dispatch(req("DeleteEverything", "f", ""), &state).await;
        assert_eq!(response, b"MalformedRequestError");
    }
}
