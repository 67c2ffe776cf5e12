//! # Gossip Crate
//!
//! Flood-with-deduplication peer gossip over a possibly cyclic peer
//! graph: the outbound broadcaster, the peer transport, the inbound
//! `FloodOperation`/`FloodBlock` handlers, and the TCP server that wires
//! them together (spec §4.6).

pub mod broadcaster;
pub mod errors;
pub mod handlers;
pub mod server;
pub mod transport;
pub mod wire;

pub use broadcaster::Broadcaster;
pub use errors::GossipError;
pub use server::{spawn_peer_server, PeerServerState};
pub use transport::{PeerTransport, TcpPeerTransport};
pub use wire::{BlockWire, PeerReply, PeerRequest};
