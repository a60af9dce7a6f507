use std::fmt;
use std::sync::Arc;

use crate::membership::PeerAddress;

/// Ordered, duplicate-free cluster membership.
///
/// Elements keep their insertion order and no two are equal. The set is
/// copy-on-write: `clone()` is cheap and returns an immutable snapshot, and
/// every mutation returns a new set instead of touching existing ones. A
/// single owner applies membership changes; readers work on snapshots taken
/// before the change.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PeerSet<P = PeerAddress> {
    peers: Arc<[P]>,
}

impl<P> PeerSet<P> {
    /// Create an empty set
    pub fn new() -> Self {
        Self {
            peers: Arc::from(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, P> {
        self.peers.iter()
    }

    pub fn as_slice(&self) -> &[P] {
        &self.peers
    }

    pub fn first(&self) -> Option<&P> {
        self.peers.first()
    }

    /// Number of members that constitutes a majority
    pub fn quorum_size(&self) -> usize {
        self.len() / 2 + 1
    }
}

impl<P> PeerSet<P>
where
    P: Eq + Clone + fmt::Debug,
{
    /// True if an equal peer is a member
    pub fn contains(&self, peer: &P) -> bool {
        self.peers.iter().any(|p| p == peer)
    }

    /// Append `peer` unless it is already a member.
    ///
    /// An existing member leaves the set unchanged: no duplicate is added and
    /// the order is not disturbed.
    pub fn add_unique(&self, peer: P) -> Self {
        if self.contains(&peer) {
            tracing::trace!(peer = ?peer, "Peer already a member");
            return self.clone();
        }

        let mut peers = Vec::with_capacity(self.len() + 1);
        peers.extend_from_slice(&self.peers);
        peers.push(peer);
        tracing::debug!(peer = ?peers[peers.len() - 1], members = peers.len(), "Peer added");

        Self {
            peers: Arc::from(peers),
        }
    }

    /// Remove `peer`, keeping the remaining members in order.
    ///
    /// Excluding a non-member returns an equal set.
    pub fn exclude(&self, peer: &P) -> Self {
        if !self.contains(peer) {
            tracing::trace!(peer = ?peer, "Peer not a member, nothing to exclude");
            return self.clone();
        }

        let peers: Vec<P> = self.peers.iter().filter(|p| *p != peer).cloned().collect();
        tracing::debug!(peer = ?peer, members = peers.len(), "Peer excluded");

        Self {
            peers: Arc::from(peers),
        }
    }

    pub fn to_vec(&self) -> Vec<P> {
        self.peers.to_vec()
    }
}

impl<P> Default for PeerSet<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: fmt::Debug> fmt::Debug for PeerSet<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.peers.iter()).finish()
    }
}

/// Builds a set keeping the first occurrence of each peer, in order.
impl<P: Eq> FromIterator<P> for PeerSet<P> {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        let mut peers: Vec<P> = Vec::new();
        for peer in iter {
            if !peers.contains(&peer) {
                peers.push(peer);
            }
        }
        Self {
            peers: Arc::from(peers),
        }
    }
}

impl<P: Eq> From<Vec<P>> for PeerSet<P> {
    fn from(peers: Vec<P>) -> Self {
        peers.into_iter().collect()
    }
}

impl<'a, P> IntoIterator for &'a PeerSet<P> {
    type Item = &'a P;
    type IntoIter = std::slice::Iter<'a, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.peers.iter()
    }
}
