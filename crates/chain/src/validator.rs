//! Chain integrity checks.
//!
//! The validator never stops at the first problem: it walks every block and
//! reports all findings in height order.

use serde::Serialize;
use starchain_core::{Block, Hash};
use thiserror::Error;
use tracing::warn;

/// A single inconsistency found in the chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IntegrityError {
    #[error("block {height}: stored hash {stored} does not match computed {computed}")]
    HashMismatch {
        height: u64,
        stored: Hash,
        computed: Hash,
    },

    #[error("block {height}: previous hash does not match the preceding block")]
    LinkMismatch {
        height: u64,
        expected: Option<Hash>,
        found: Option<Hash>,
    },

    #[error("block at position {position} has height {height}")]
    HeightMismatch { height: u64, position: u64 },
}

impl IntegrityError {
    /// Height of the block the finding refers to.
    pub fn height(&self) -> u64 {
        match self {
            Self::HashMismatch { height, .. }
            | Self::LinkMismatch { height, .. }
            | Self::HeightMismatch { height, .. } => *height,
        }
    }
}

/// Check every block's self-hash, height and link to its predecessor.
pub fn validate_blocks(blocks: &[Block]) -> Vec<IntegrityError> {
    let mut errors = Vec::new();

    for (position, block) in blocks.iter().enumerate() {
        let position = position as u64;

        if block.height != position {
            errors.push(IntegrityError::HeightMismatch {
                height: block.height,
                position,
            });
        }

        if !block.validate() {
            errors.push(IntegrityError::HashMismatch {
                height: block.height,
                stored: block.hash,
                computed: block.compute_hash(),
            });
        }

        // Genesis must not link anywhere; every other block links to the
        // actual hash of the block before it.
        let expected = match position {
            0 => None,
            _ => Some(blocks[position as usize - 1].hash),
        };
        if block.previous_hash != expected {
            errors.push(IntegrityError::LinkMismatch {
                height: block.height,
                expected,
                found: block.previous_hash,
            });
        }
    }

    for error in &errors {
        warn!(height = error.height(), "{error}");
    }
    errors
}
