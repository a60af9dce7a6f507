use thiserror::Error;

use crate::membership::PeerAddress;

/// Failure to turn wire bytes back into a peer address
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PeerDecodeError {
    #[error("peer bytes are not valid UTF-8")]
    InvalidUtf8,

    #[error("invalid peer address {addr:?}: {reason}")]
    InvalidAddress { addr: String, reason: String },

    #[error("{0}")]
    Other(String),
}

/// Per-peer wire encoding supplied by the transport layer.
///
/// Keeps the configuration codec independent of the addressing scheme: the
/// transport decides how one peer becomes bytes, the codec only frames the
/// list. Implementations must round-trip: `decode_peer(encode_peer(p)) == p`.
pub trait PeerTransport {
    type Peer;

    fn encode_peer(&self, peer: &Self::Peer) -> Vec<u8>;

    fn decode_peer(&self, buf: &[u8]) -> Result<Self::Peer, PeerDecodeError>;
}

/// Encodes a [`PeerAddress`] as its canonical `ip:port` text
#[derive(Debug, Clone, Copy, Default)]
pub struct SocketTransport;

impl PeerTransport for SocketTransport {
    type Peer = PeerAddress;

    fn encode_peer(&self, peer: &PeerAddress) -> Vec<u8> {
        peer.to_string().into_bytes()
    }

    fn decode_peer(&self, buf: &[u8]) -> Result<PeerAddress, PeerDecodeError> {
        let text = std::str::from_utf8(buf).map_err(|_| PeerDecodeError::InvalidUtf8)?;
        text.parse()
            .map_err(|e: std::net::AddrParseError| PeerDecodeError::InvalidAddress {
                addr: text.to_string(),
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_transport_round_trip() {
        let transport = SocketTransport;
        for raw in ["127.0.0.1:50051", "[::1]:7000", "10.1.2.3:1"] {
            let addr: PeerAddress = raw.parse().unwrap();
            let bytes = transport.encode_peer(&addr);
            assert_eq!(bytes, raw.as_bytes());
            assert_eq!(transport.decode_peer(&bytes).unwrap(), addr);
        }
    }

    #[test]
    fn test_socket_transport_rejects_bad_utf8() {
        let err = SocketTransport.decode_peer(&[0xff, 0xfe]).unwrap_err();
        assert_eq!(err, PeerDecodeError::InvalidUtf8);
    }

    #[test]
    fn test_socket_transport_rejects_bad_address() {
        let err = SocketTransport.decode_peer(b"not-an-addr").unwrap_err();
        assert!(matches!(err, PeerDecodeError::InvalidAddress { ref addr, .. } if addr == "not-an-addr"));
    }
}
