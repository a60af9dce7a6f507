//! Fixed-width big-endian integer encoding.
//!
//! Log indices and terms cross the storage and wire boundary as 8-byte
//! big-endian values. Big-endian keeps byte-lexicographic order identical to
//! numeric order, so encoded keys sort correctly in ordered storage.

use crate::error::{QuorumError, Result};

/// Width of an encoded `u64`.
pub const U64_LEN: usize = 8;

/// Converts a `u64` to its 8-byte big-endian form
pub fn u64_to_bytes(value: u64) -> [u8; U64_LEN] {
    value.to_be_bytes()
}

/// Converts an 8-byte big-endian sequence back to a `u64`
pub fn bytes_to_u64(bytes: [u8; U64_LEN]) -> u64 {
    u64::from_be_bytes(bytes)
}

/// Decodes a `u64` from a slice read back from storage.
///
/// Any slice that is not exactly 8 bytes long is rejected rather than padded
/// or truncated.
pub fn try_bytes_to_u64(bytes: &[u8]) -> Result<u64> {
    let fixed: [u8; U64_LEN] = bytes.try_into().map_err(|_| QuorumError::InvalidLength {
        expected: U64_LEN,
        actual: bytes.len(),
    })?;
    Ok(bytes_to_u64(fixed))
}
