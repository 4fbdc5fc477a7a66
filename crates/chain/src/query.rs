//! Read-only lookups over committed blocks.

use crate::error::QueryError;
use starchain_core::{Address, Block, DecodedBody, Hash, StarCodec, StarRecord};

/// Find the single block with `hash`.
///
/// More than one match means the chain's hash uniqueness is broken; that is
/// reported, never resolved by picking one.
pub fn find_by_hash(blocks: &[Block], hash: &Hash) -> Result<Block, QueryError> {
    let mut matches = blocks.iter().filter(|b| b.hash == *hash);
    match (matches.next(), matches.count()) {
        (None, _) => Err(QueryError::NotFound(*hash)),
        (Some(block), 0) => Ok(block.clone()),
        (Some(_), rest) => Err(QueryError::AmbiguousHash {
            hash: *hash,
            count: rest + 1,
        }),
    }
}

pub fn find_by_height(blocks: &[Block], height: u64) -> Option<Block> {
    blocks.iter().find(|b| b.height == height).cloned()
}

/// Decode every registration block and keep those owned by `owner`, in
/// ascending height order.
pub fn stars_by_owner<C: StarCodec + ?Sized>(
    blocks: &[Block],
    owner: &Address,
    codec: &C,
) -> Result<Vec<StarRecord>, QueryError> {
    let mut records = Vec::new();
    for block in blocks.iter().filter(|b| !b.is_genesis()) {
        let decoded = block.decode_body(codec).map_err(|e| QueryError::Decode {
            height: block.height,
            reason: e.to_string(),
        })?;
        match decoded {
            DecodedBody::Star(record) if record.owner == *owner => records.push(record),
            _ => {}
        }
    }
    Ok(records)
}
