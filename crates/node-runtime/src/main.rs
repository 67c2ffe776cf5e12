//! # Record-Miner Node Runtime
//!
//! The entry point for a single miner node. Loads the static config, wires
//! the chain, mempools, gossip transport, block producer, difficulty
//! controller, and client gateway together, then runs until interrupted
//! (spec §3, §4).
//!
//! ## Subsystems
//!
//! 1. Replicated chain + difficulty controller (qc-chain)
//! 2. Pending-operation and block-inbox queues (qc-mempool)
//! 3. Peer gossip server + broadcaster (qc-gossip)
//! 4. Block production / proof-of-work (qc-miner)
//! 5. Client gateway (qc-gateway)

use anyhow::{Context, Result};
use qc_chain::{spawn_difficulty_controller, Chain};
use qc_gateway::{spawn_client_server, GatewayState};
use qc_gossip::{spawn_peer_server, Broadcaster, PeerServerState, TcpPeerTransport};
use qc_mempool::{BlockInbox, PendingOps};
use qc_miner::spawn_block_producer;
use shared_types::MinerConfig;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Peer calls give up after this long (spec §5, "Cancellation & timeouts");
/// the upstream contract leaves this unspecified.
const PEER_CALL_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config_path = std::env::args()
        .nth(1)
        .context("usage: record-miner <config.json>")?;
    let config = MinerConfig::load(&config_path)
        .with_context(|| format!("failed to load config from {config_path}"))?;

    info!(miner_id = %config.miner_id, "starting record-miner node");

    let chain = Arc::new(Chain::new(config.genesis_prev_hash.clone()));
    let pending = Arc::new(PendingOps::new());
    let inbox = Arc::new(BlockInbox::new());
    let transport = TcpPeerTransport::new(PEER_CALL_TIMEOUT);
    let broadcaster = Arc::new(Broadcaster::new(config.peer_addrs.clone(), transport));

    let peer_state = Arc::new(PeerServerState {
        pending: pending.clone(),
        inbox: inbox.clone(),
        chain: chain.clone(),
        broadcaster: broadcaster.clone(),
    });
    spawn_peer_server(&config.incoming_peer_addr, peer_state)
        .await
        .with_context(|| format!("failed to bind peer address {}", config.incoming_peer_addr))?;

    let gateway_state = Arc::new(GatewayState::new(
        config.miner_id.clone(),
        Arc::new(qc_gateway::FileStore::new()),
        pending.clone(),
        broadcaster.clone(),
    ));
    spawn_client_server(&config.incoming_client_addr, gateway_state)
        .await
        .with_context(|| {
            format!(
                "failed to bind client address {}",
                config.incoming_client_addr
            )
        })?;

    spawn_block_producer(
        config.miner_id.clone(),
        config.block_interval(),
        config.max_records_per_block,
        chain.clone(),
        pending.clone(),
        broadcaster.clone(),
    );

    spawn_difficulty_controller(chain.clone(), config.difficulty_interval());

    info!("record-miner node is running; press Ctrl+C to stop");
    tokio::signal::ctrl_c().await?;
    info!("shutting down");

    Ok(())
}
