//! Election timing, membership and wakeup primitives for a Raft consensus
//! engine.

pub mod codec;
pub mod config;
pub mod error;
pub mod id;
pub mod membership;
pub mod raft;

pub use error::{QuorumError, Result};
