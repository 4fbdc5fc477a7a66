//! The block entity: a hash-sealed record linked to its predecessor.

use crate::hash::{hash, Hash};
use crate::star::{CodecError, StarCodec, StarRecord};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Body carried by the block at height 0.
pub const GENESIS_MARKER: &str = "Genesis Block";

/// Stored payload of a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockBody {
    /// The fixed, content-less root body.
    Genesis,
    /// A star record in its encoded stored form.
    Star(String),
}

/// A block body after decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedBody {
    Genesis(&'static str),
    Star(StarRecord),
}

/// Fields covered by the block hash. Everything except the hash itself.
#[derive(Serialize)]
struct HashInput<'a> {
    height: u64,
    time: u64,
    previous_hash: &'a Option<Hash>,
    body: &'a BlockBody,
}

/// A single record in the chain.
///
/// `height`, `time`, `previous_hash` and `hash` are placeholders until the
/// chain store seals the block on append.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub height: u64,
    /// Unix timestamp in seconds.
    pub time: u64,
    /// Hash of the block at `height - 1`; `None` only for genesis.
    pub previous_hash: Option<Hash>,
    pub hash: Hash,
    pub body: BlockBody,
}

impl Block {
    /// Create an unsealed block carrying `body`.
    pub fn new(body: BlockBody) -> Self {
        Self {
            height: 0,
            time: 0,
            previous_hash: None,
            hash: Hash::ZERO,
            body,
        }
    }

    /// Create the unsealed genesis block.
    pub fn genesis() -> Self {
        Self::new(BlockBody::Genesis)
    }

    /// Create an unsealed registration block, encoding `record` with `codec`.
    pub fn with_star<C: StarCodec + ?Sized>(record: &StarRecord, codec: &C) -> Self {
        Self::new(BlockBody::Star(codec.encode(record)))
    }

    /// Assign position, link and timestamp, then compute the hash.
    pub fn seal(&mut self, height: u64, previous_hash: Option<Hash>, time: u64) {
        self.height = height;
        self.previous_hash = previous_hash;
        self.time = time;
        self.hash = self.compute_hash();
    }

    /// Digest of every field except `hash`.
    pub fn compute_hash(&self) -> Hash {
        let input = HashInput {
            height: self.height,
            time: self.time,
            previous_hash: &self.previous_hash,
            body: &self.body,
        };
        let encoded = bincode::serialize(&input).expect("serialization should not fail");
        hash(&encoded)
    }

    /// Whether the stored hash still matches the block's contents.
    pub fn validate(&self) -> bool {
        self.compute_hash() == self.hash
    }

    /// Check if this is the genesis block.
    pub fn is_genesis(&self) -> bool {
        self.height == 0 && matches!(self.body, BlockBody::Genesis)
    }

    /// Invert the body encoding applied when the block was built.
    pub fn decode_body<C: StarCodec + ?Sized>(&self, codec: &C) -> Result<DecodedBody, CodecError> {
        match &self.body {
            BlockBody::Genesis => Ok(DecodedBody::Genesis(GENESIS_MARKER)),
            BlockBody::Star(stored) => codec.decode(stored).map(DecodedBody::Star),
        }
    }
}

/// Get the current Unix timestamp.
pub fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_secs()
}
