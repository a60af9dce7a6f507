use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuorumError {
    #[error("Configuration corrupt: {0}")]
    ConfigurationCorrupt(String),

    #[error("Secure randomness unavailable: {0}")]
    RandomnessUnavailable(String),

    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, QuorumError>;
