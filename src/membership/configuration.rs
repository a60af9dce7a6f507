//! Serialization of cluster membership.
//!
//! A configuration is framed as a CBOR array of byte strings, one per peer,
//! in membership order. Each byte string is whatever the transport produced
//! for that peer. CBOR is self-describing and length-prefixed, so an empty
//! cluster is the one-byte empty array and element order is never changed.

use std::fmt;

use serde_bytes::ByteBuf;

use crate::error::{QuorumError, Result};
use crate::membership::{PeerSet, PeerTransport};

/// Serialized snapshot of a [`PeerSet`]. Immutable once produced.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct EncodedConfiguration(Vec<u8>);

impl EncodedConfiguration {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Wraps bytes read back from storage or the wire.
impl From<Vec<u8>> for EncodedConfiguration {
    fn from(buf: Vec<u8>) -> Self {
        Self(buf)
    }
}

impl AsRef<[u8]> for EncodedConfiguration {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for EncodedConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EncodedConfiguration({} bytes)", self.0.len())
    }
}

/// Serialize `peers` using the transport's per-peer encoding.
///
/// Output is deterministic for a given peer order and per-peer encoding.
pub fn encode_peers<T>(peers: &PeerSet<T::Peer>, transport: &T) -> Result<EncodedConfiguration>
where
    T: PeerTransport,
{
    let blobs: Vec<ByteBuf> = peers
        .iter()
        .map(|peer| ByteBuf::from(transport.encode_peer(peer)))
        .collect();

    let buf = serde_cbor::to_vec(&blobs).map_err(|e| {
        tracing::error!(error = %e, members = peers.len(), "Failed to encode peers");
        QuorumError::ConfigurationCorrupt(format!("failed to encode peers: {e}"))
    })?;

    Ok(EncodedConfiguration(buf))
}

/// Deserialize a configuration produced by [`encode_peers`].
///
/// # Errors
///
/// Returns [`QuorumError::ConfigurationCorrupt`] if the framing is malformed
/// or truncated, has trailing bytes, a peer fails to decode, or the same peer
/// appears twice. No partial set is ever returned: membership that cannot be
/// fully trusted must not be used.
pub fn decode_peers<T>(buf: &[u8], transport: &T) -> Result<PeerSet<T::Peer>>
where
    T: PeerTransport,
    T::Peer: Eq + Clone + fmt::Debug,
{
    let blobs: Vec<ByteBuf> = serde_cbor::from_slice(buf).map_err(|e| {
        tracing::error!(error = %e, len = buf.len(), "Failed to decode peers");
        QuorumError::ConfigurationCorrupt(format!("failed to decode peers: {e}"))
    })?;

    let mut peers: Vec<T::Peer> = Vec::with_capacity(blobs.len());
    for (position, blob) in blobs.iter().enumerate() {
        let peer = transport.decode_peer(blob).map_err(|e| {
            tracing::error!(position, error = %e, "Failed to decode peer");
            QuorumError::ConfigurationCorrupt(format!("peer {position}: {e}"))
        })?;

        if peers.contains(&peer) {
            tracing::error!(position, peer = ?peer, "Duplicate peer in configuration");
            return Err(QuorumError::ConfigurationCorrupt(format!(
                "duplicate peer {peer:?} at position {position}"
            )));
        }
        peers.push(peer);
    }

    Ok(PeerSet::from(peers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::membership::{PeerAddress, PeerDecodeError, SocketTransport};

    /// Peers are their own wire form.
    struct IdentityTransport;

    impl PeerTransport for IdentityTransport {
        type Peer = Vec<u8>;

        fn encode_peer(&self, peer: &Vec<u8>) -> Vec<u8> {
            peer.clone()
        }

        fn decode_peer(&self, buf: &[u8]) -> std::result::Result<Vec<u8>, PeerDecodeError> {
            Ok(buf.to_vec())
        }
    }

    fn bytes_set(peers: &[&[u8]]) -> PeerSet<Vec<u8>> {
        peers.iter().map(|p| p.to_vec()).collect()
    }

    #[test]
    fn test_identity_round_trip_keeps_order() {
        let peers = bytes_set(&[b"A", b"B", b"C"]);
        let encoded = encode_peers(&peers, &IdentityTransport).unwrap();
        let decoded = decode_peers(encoded.as_bytes(), &IdentityTransport).unwrap();
        assert_eq!(decoded, peers);
        assert_eq!(decoded.as_slice(), &[b"A".to_vec(), b"B".to_vec(), b"C".to_vec()]);
    }

    #[test]
    fn test_wire_layout() {
        let encoded = encode_peers(&bytes_set(&[b"a", b"bc"]), &IdentityTransport).unwrap();
        // array(2), bytes(1) "a", bytes(2) "bc"
        assert_eq!(encoded.as_bytes(), &[0x82, 0x41, b'a', 0x42, b'b', b'c']);
    }

    #[test]
    fn test_empty_cluster() {
        let encoded = encode_peers(&PeerSet::new(), &IdentityTransport).unwrap();
        assert_eq!(encoded.as_bytes(), &[0x80]);

        let decoded = decode_peers(encoded.as_bytes(), &IdentityTransport).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let peers = bytes_set(&[b"x", b"y"]);
        let a = encode_peers(&peers, &IdentityTransport).unwrap();
        let b = encode_peers(&peers.clone(), &IdentityTransport).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_socket_round_trip() {
        let peers: PeerSet = ["127.0.0.1:7001", "127.0.0.1:7002", "[::1]:7003"]
            .iter()
            .map(|s| s.parse::<PeerAddress>().unwrap())
            .collect();
        let encoded = encode_peers(&peers, &SocketTransport).unwrap();
        assert_eq!(decode_peers(encoded.as_ref(), &SocketTransport).unwrap(), peers);
    }

    #[test]
    fn test_truncated_input_is_corrupt() {
        let encoded = encode_peers(&bytes_set(&[b"A", b"B"]), &IdentityTransport).unwrap();
        let bytes = encoded.as_bytes();
        let truncated = &bytes[..bytes.len() - 1];
        let err = decode_peers(truncated, &IdentityTransport).unwrap_err();
        assert!(matches!(err, QuorumError::ConfigurationCorrupt(_)));
    }

    #[test]
    fn test_empty_input_is_corrupt() {
        let err = decode_peers(&[], &IdentityTransport).unwrap_err();
        assert!(matches!(err, QuorumError::ConfigurationCorrupt(_)));
    }

    #[test]
    fn test_trailing_bytes_are_corrupt() {
        let mut bytes = encode_peers(&bytes_set(&[b"A"]), &IdentityTransport)
            .unwrap()
            .into_bytes();
        bytes.push(0x00);
        assert!(decode_peers(&bytes, &IdentityTransport).is_err());
    }

    #[test]
    fn test_non_list_is_corrupt() {
        // CBOR unsigned integer 1
        assert!(decode_peers(&[0x01], &IdentityTransport).is_err());
    }

    #[test]
    fn test_bad_peer_is_corrupt() {
        let encoded = encode_peers(&bytes_set(&[b"127.0.0.1:1", b"bogus"]), &IdentityTransport)
            .unwrap();
        let err = decode_peers(encoded.as_bytes(), &SocketTransport).unwrap_err();
        match err {
            QuorumError::ConfigurationCorrupt(msg) => assert!(msg.starts_with("peer 1:"), "{msg}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_peer_is_corrupt() {
        // Two spellings of the same socket address decode to equal peers.
        let encoded = encode_peers(
            &bytes_set(&[b"[::1]:7000", b"[0:0:0:0:0:0:0:1]:7000"]),
            &IdentityTransport,
        )
        .unwrap();
        let err = decode_peers(encoded.as_bytes(), &SocketTransport).unwrap_err();
        assert!(matches!(err, QuorumError::ConfigurationCorrupt(msg) if msg.contains("duplicate")));
    }

    #[test]
    fn test_debug_hides_payload() {
        let encoded = EncodedConfiguration::from(vec![0x80]);
        assert_eq!(format!("{encoded:?}"), "EncodedConfiguration(1 bytes)");
        assert_eq!(encoded.len(), 1);
        assert!(!encoded.is_empty());
    }
}
