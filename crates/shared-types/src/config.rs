//! Static, process-lifetime miner configuration (spec §3, §6).
//!
//! `MinedCoinsPerOpBlock` and its siblings are reserved economic fields:
//! they round-trip through (de)serialization but the core never reads
//! them (spec §9, "Open question — economic fields").

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

fn default_block_interval_secs() -> u64 {
    10
}

fn default_difficulty_interval_secs() -> u64 {
    30
}

fn default_max_records_per_block() -> usize {
    2
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinerConfig {
    #[serde(rename = "MinerID")]
    pub miner_id: String,

    #[serde(rename = "PeerMinersAddrs")]
    pub peer_addrs: Vec<String>,

    #[serde(rename = "IncomingMinersAddr")]
    pub incoming_peer_addr: String,

    #[serde(rename = "IncomingClientsAddr")]
    pub incoming_client_addr: String,

    #[serde(rename = "GenesisBlockHash", default)]
    pub genesis_prev_hash: String,

    /// Reserved; declared but not enforced by the core (spec §3, §9).
    #[serde(rename = "MinedCoinsPerOpBlock", default)]
    pub mined_coins_per_op_block: i64,
    #[serde(rename = "MinedCoinsPerNoOpBlock", default)]
    pub mined_coins_per_noop_block: i64,
    #[serde(rename = "NumCoinsPerFileCreate", default)]
    pub num_coins_per_file_create: i64,
    #[serde(rename = "ConfirmsPerFileCreate", default)]
    pub confirms_per_file_create: i64,
    #[serde(rename = "ConfirmsPerFileAppend", default)]
    pub confirms_per_file_append: i64,
    #[serde(rename = "PowPerOpBlock", default)]
    pub pow_per_op_block: i64,
    #[serde(rename = "PowPerNoOpBlock", default)]
    pub pow_per_noop_block: i64,

    /// Block production tick, in seconds (default 10; spec §3).
    #[serde(rename = "BlockIntervalSecs", default = "default_block_interval_secs")]
    pub block_interval_secs: u64,

    /// Difficulty-adjust tick, in seconds (default 30; spec §3).
    #[serde(
        rename = "DifficultyIntervalSecs",
        default = "default_difficulty_interval_secs"
    )]
    pub difficulty_interval_secs: u64,

    /// Max records drained from the pending queue per mined block
    /// (default 2; spec §3).
    #[serde(
        rename = "MaxRecordsPerBlock",
        default = "default_max_records_per_block"
    )]
    pub max_records_per_block: usize,
}

impl MinerConfig {
    pub fn block_interval(&self) -> Duration {
        Duration::from_secs(self.block_interval_secs)
    }

    pub fn difficulty_interval(&self) -> Duration {
        Duration::from_secs(self.difficulty_interval_secs)
    }

    /// Reads and parses the JSON config file named by `path`. Any failure
    /// here is fatal (spec §7): the caller should abort the process.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();
        let raw = std::fs::read_to_string(path_ref).map_err(|source| ConfigError::Read {
            path: path_ref.display().to_string(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path_ref.display().to_string(),
            source,
        })
    }
}
