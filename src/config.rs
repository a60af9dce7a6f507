use std::time::Duration;

use crate::error::{QuorumError, Result};
use crate::membership::{PeerAddress, PeerSet};
use crate::raft::TIMEOUT_SPREAD;

/// Timing parameters for election and heartbeat timeouts.
///
/// Election timeouts are drawn from `[min, 2 * min)`; only the minimum is
/// configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaftTimingConfig {
    pub election_timeout_min_ms: u64,
    /// Must stay well below the election timeout so followers hear from the
    /// leader before they time out.
    pub heartbeat_interval_ms: u64,
}

impl Default for RaftTimingConfig {
    fn default() -> Self {
        Self {
            election_timeout_min_ms: 150,
            heartbeat_interval_ms: 50,
        }
    }
}

impl RaftTimingConfig {
    pub fn election_timeout_min(&self) -> Duration {
        Duration::from_millis(self.election_timeout_min_ms)
    }

    /// Exclusive upper bound of a randomized election timeout
    pub fn election_timeout_max(&self) -> Duration {
        self.election_timeout_min() * TIMEOUT_SPREAD
    }

    pub fn heartbeat_interval(&self) -> Duration {
        Duration::from_millis(self.heartbeat_interval_ms)
    }

    /// Check that the heartbeat interval is shorter than the minimum election
    /// timeout. A zero election timeout disables elections and is accepted.
    pub fn validate(&self) -> Result<()> {
        if self.election_timeout_min_ms == 0 {
            return Ok(());
        }
        if self.heartbeat_interval_ms == 0 {
            return Err(QuorumError::InvalidConfig(
                "heartbeat interval must be non-zero".to_string(),
            ));
        }
        if self.heartbeat_interval_ms >= self.election_timeout_min_ms {
            return Err(QuorumError::InvalidConfig(format!(
                "heartbeat interval {}ms must be below election timeout {}ms",
                self.heartbeat_interval_ms, self.election_timeout_min_ms
            )));
        }
        Ok(())
    }
}

/// Bootstrap membership and timing for one node
#[derive(Debug, Clone)]
pub struct ClusterConfig {
    pub local_addr: PeerAddress,
    pub peers: Vec<PeerAddress>,
    pub timing: RaftTimingConfig,
}

impl ClusterConfig {
    pub fn new(local_addr: PeerAddress) -> Self {
        Self {
            local_addr,
            peers: Vec::new(),
            timing: RaftTimingConfig::default(),
        }
    }

    pub fn with_peer(mut self, addr: PeerAddress) -> Self {
        self.peers.push(addr);
        self
    }

    pub fn with_timing(mut self, timing: RaftTimingConfig) -> Self {
        self.timing = timing;
        self
    }

    /// Full membership, local node first, duplicates dropped
    pub fn peer_set(&self) -> PeerSet {
        std::iter::once(self.local_addr)
            .chain(self.peers.iter().copied())
            .collect()
    }

    /// Members other than the local node
    pub fn remote_peers(&self) -> PeerSet {
        self.peer_set().exclude(&self.local_addr)
    }
}
