//! Errors surfaced by the registry.

use starchain_core::{Hash, StarError};
use thiserror::Error;

/// Reasons a star submission is refused. No state changes on any of them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("malformed challenge message: {0}")]
    MalformedChallenge(String),

    #[error("challenge expired ({elapsed}s elapsed, window is {window}s)")]
    ExpiredChallenge { elapsed: u64, window: u64 },

    #[error("signature does not prove ownership of the address")]
    InvalidSignature,

    #[error("invalid star: {0}")]
    InvalidStar(#[from] StarError),
}

/// Lookup failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("no block with hash {0}")]
    NotFound(Hash),

    #[error("{count} blocks share hash {hash}")]
    AmbiguousHash { hash: Hash, count: usize },

    #[error("body of block {height} could not be decoded: {reason}")]
    Decode { height: u64, reason: String },
}
