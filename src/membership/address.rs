use std::fmt;
use std::net::{AddrParseError, SocketAddr};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Network endpoint of one cluster member.
///
/// Equality is structural on the parsed socket address, so `127.0.0.1:7000`
/// written two different ways still compares equal once parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeerAddress(SocketAddr);

impl PeerAddress {
    pub fn new(addr: SocketAddr) -> Self {
        Self(addr)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        self.0
    }
}

impl From<SocketAddr> for PeerAddress {
    fn from(addr: SocketAddr) -> Self {
        Self(addr)
    }
}

impl FromStr for PeerAddress {
    type Err = AddrParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl fmt::Display for PeerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let addr: PeerAddress = "10.0.0.1:9000".parse().unwrap();
        assert_eq!(addr.to_string(), "10.0.0.1:9000");
        assert_eq!(addr.socket_addr().port(), 9000);
    }

    #[test]
    fn test_equality_is_by_value() {
        let a: PeerAddress = "[::1]:7000".parse().unwrap();
        let b: PeerAddress = "[0:0:0:0:0:0:0:1]:7000".parse().unwrap();
        assert_eq!(a, b);
        assert_ne!(a, "[::1]:7001".parse::<PeerAddress>().unwrap());
    }

    #[test]
    fn test_rejects_hostname_without_resolution() {
        assert!("node-1:7000".parse::<PeerAddress>().is_err());
    }
}
