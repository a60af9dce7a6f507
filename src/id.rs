//! Unique identifier generation from a secure random source.

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use uuid::Uuid;

use crate::error::{QuorumError, Result};

/// Generates 128-bit random identifiers formatted as
/// `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`.
///
/// The random source is injected so tests can substitute a seeded or failing
/// generator. Only sources marked [`CryptoRng`] are accepted.
#[derive(Debug, Clone)]
pub struct IdGenerator<R = OsRng> {
    rng: R,
}

impl Default for IdGenerator<OsRng> {
    fn default() -> Self {
        Self::new(OsRng)
    }
}

impl<R: RngCore + CryptoRng> IdGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generate a new identifier.
    ///
    /// The 16 random bytes are rendered as-is; no version or variant bits are
    /// forced, so every bit carries entropy.
    ///
    /// # Errors
    ///
    /// Returns [`QuorumError::RandomnessUnavailable`] if the source cannot be
    /// read. Callers should treat this as fatal: identifiers produced from a
    /// degraded source cannot be assumed unique.
    pub fn generate(&mut self) -> Result<String> {
        let mut buf = [0u8; 16];
        if let Err(e) = self.rng.try_fill_bytes(&mut buf) {
            tracing::error!(error = %e, "Failed to read random bytes");
            return Err(QuorumError::RandomnessUnavailable(e.to_string()));
        }
        Ok(Uuid::from_bytes(buf).hyphenated().to_string())
    }
}

/// Generate an identifier from the operating system's entropy source
pub fn generate_uuid() -> Result<String> {
    IdGenerator::default().generate()
}
