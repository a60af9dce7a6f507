//! Cluster membership.
//!
//! - [`PeerSet`]: ordered, duplicate-free, copy-on-write list of members
//! - [`PeerTransport`]: per-peer wire encoding supplied by the transport layer
//! - [`encode_peers`] / [`decode_peers`]: configuration snapshots for
//!   persistence and replication
//!
//! # Membership changes
//!
//! The consensus core owns the current set and replaces it wholesale on each
//! change:
//!
//! 1. Take the current set (readers keep their own clone)
//! 2. Derive the next set with [`PeerSet::add_unique`] or [`PeerSet::exclude`]
//! 3. Encode it with [`encode_peers`] and replicate/persist the bytes
//! 4. Swap it in as the current set

pub mod address;
pub mod configuration;
pub mod peer_set;
pub mod transport;

pub use address::PeerAddress;
pub use configuration::{decode_peers, encode_peers, EncodedConfiguration};
pub use peer_set::PeerSet;
pub use transport::{PeerDecodeError, PeerTransport, SocketTransport};
