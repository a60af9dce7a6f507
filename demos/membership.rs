//! Walks through a membership change on a three-node cluster.
//!
//! ```sh
//! RUST_LOG=debug cargo run --example membership
//! ```

use std::time::Duration;

use tracing_subscriber::EnvFilter;

use quorum_lite::config::{ClusterConfig, RaftTimingConfig};
use quorum_lite::id::generate_uuid;
use quorum_lite::membership::{decode_peers, encode_peers, PeerAddress, SocketTransport};
use quorum_lite::raft::{notify_all, wake_channel, ElectionTimer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cfg = ClusterConfig::new("127.0.0.1:50051".parse::<PeerAddress>()?)
        .with_peer("127.0.0.1:50052".parse::<PeerAddress>()?)
        .with_peer("127.0.0.1:50053".parse::<PeerAddress>()?)
        .with_timing(RaftTimingConfig {
            election_timeout_min_ms: 100,
            heartbeat_interval_ms: 30,
        });
    cfg.timing.validate()?;

    let change_id = generate_uuid()?;
    let current = cfg.peer_set();
    tracing::info!(change_id = %change_id, members = ?current, "Starting membership change");

    // Replace node 2 with node 4
    let next = current
        .add_unique("127.0.0.1:50054".parse::<PeerAddress>()?)
        .exclude(&"127.0.0.1:50052".parse::<PeerAddress>()?);
    let encoded = encode_peers(&next, &SocketTransport)?;
    let restored = decode_peers(encoded.as_bytes(), &SocketTransport)?;
    tracing::info!(
        change_id = %change_id,
        bytes = encoded.len(),
        members = ?restored,
        quorum = restored.quorum_size(),
        "Configuration replicated"
    );

    // Wake everyone waiting on the membership change
    let (tx_a, mut rx_a) = wake_channel();
    let (tx_b, mut rx_b) = wake_channel();
    let waiters = tokio::spawn(async move {
        rx_a.wait().await;
        rx_b.wait().await;
    });
    notify_all([&tx_a, &tx_b]);
    waiters.await?;

    let mut timer = ElectionTimer::from_entropy();
    let min = cfg.timing.election_timeout_min();
    let timeout = timer.schedule(min);
    let started = tokio::time::Instant::now();
    tokio::select! {
        _ = timeout => {
            tracing::info!(elapsed_ms = started.elapsed().as_millis() as u64, "Election timeout fired");
        }
        _ = tokio::time::sleep(Duration::from_secs(1)) => {
            tracing::warn!("Election timeout did not fire");
        }
    }

    Ok(())
}
