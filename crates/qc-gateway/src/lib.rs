//! # Client Gateway Crate
//!
//! The client-facing surface (spec §4.7): derived file state, the
//! line-oriented JSON request protocol, and the TCP server that dispatches
//! requests against it, enqueuing and broadcasting every mutating op.

pub mod errors;
pub mod file_store;
pub mod protocol;
pub mod server;

pub use errors::GatewayError;
pub use file_store::FileStore;
pub use protocol::ClientRequest;
pub use server::{spawn_client_server, GatewayState};
