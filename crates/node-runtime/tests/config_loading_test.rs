//! Integration test for loading a node's on-disk JSON config the same way
//! `main` does at startup.

use shared_types::MinerConfig;
use std::io::Write;

#[test]
fn loads_a_full_miner_config_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "MinerID": "M1",
            "PeerMinersAddrs": ["127.0.0.1:9001", "127.0.0.1:9002"],
            "IncomingMinersAddr": "127.0.0.1:9000",
            "IncomingClientsAddr": "127.0.0.1:9100",
            "GenesisBlockHash": "",
            "BlockIntervalSecs": 5,
            "DifficultyIntervalSecs": 15,
            "MaxRecordsPerBlock": 3
        }}"#
    )
    .unwrap();

    let config = MinerConfig::load(file.path()).unwrap();
    assert_eq!(config.miner_id, "M1");
    assert_eq!(config.peer_addrs.len(), 2);
    assert_eq!(config.block_interval(), std::time::Duration::from_secs(5));
    assert_eq!(config.max_records_per_block, 3);
}

#[test]
fn missing_config_file_is_a_load_error() {
    let result = MinerConfig::load("/nonexistent/path/to/config.json");
    assert!(result.is_err());
}
