//! # DifficultyController (spec §4.5)
//!
//! A ticker fires at a configured interval (default 30s) and sets
//! `difficulty = floor(chain_length / 2)`. No renegotiation is performed
//! when peers disagree on difficulty; divergence is a liveness issue, not
//! a safety one.

use crate::chain::Chain;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::info;

/// Spawns the periodic difficulty-adjustment task. The returned handle's
/// task runs until the process exits or the handle is aborted.
pub fn spawn_difficulty_controller(chain: Arc<Chain>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick fires immediately; skip it so the initial
        // difficulty set by `Chain::new` stands until the first real tick.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let new_difficulty = chain.len() / 2;
            chain.set_difficulty(new_difficulty);
            info!(difficulty = new_difficulty, "difficulty adjusted");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn difficulty_tracks_floor_half_chain_length() {
        let chain = Arc::new(Chain::new(String::new()));
        for _ in 0..9 {
            let tip_hash = chain.tip_hash();
            let next = shared_types::Block {
                prev_hash: tip_hash,
                index: chain.len() as u64,
                timestamp: 0,
                nonce: 0,
                transactions: Vec::new(),
            };
            chain.set_difficulty(0);
            chain.append(next).unwrap();
        }
        assert_eq!(chain.len(), 10);

        let handle = spawn_difficulty_controller(chain.clone(), Duration::from_secs(30));
        tokio::time::advance(Duration::from_secs(31)).await;
        tokio::task::yield_now().await;
        assert_eq!(chain.difficulty(), 5);
        handle.abort();
    }
}
