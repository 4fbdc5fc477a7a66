//! In-memory block storage and the append critical section.

use starchain_core::{current_timestamp, Block, Hash};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

struct ChainInner {
    /// Committed blocks in append order.
    blocks: Vec<Block>,
    /// Height of the last committed block; `None` before genesis.
    height: Option<u64>,
}

/// Owns the ordered block sequence and the current height.
///
/// All writers go through [`ChainStore::append`] under the write lock, so
/// height assignment, linking, timestamping, hashing and commit happen as
/// one unit. Readers share the read lock and see a consistent chain.
pub struct ChainStore {
    inner: RwLock<ChainInner>,
}

impl ChainStore {
    /// Create an empty, uninitialized store.
    pub fn new() -> Self {
        Self::from_snapshot(Vec::new())
    }

    /// Restore a store from a previously taken snapshot.
    ///
    /// Blocks are taken as-is; run the chain validator to audit them.
    pub fn from_snapshot(blocks: Vec<Block>) -> Self {
        let height = blocks.last().map(|b| b.height);
        Self {
            inner: RwLock::new(ChainInner { blocks, height }),
        }
    }

    // A panic while holding the lock leaves the sequence untouched (commit is
    // the final push), so a poisoned guard is still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, ChainInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ChainInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Append the genesis block if the chain is empty.
    ///
    /// Returns the genesis block when this call created it, `None` when the
    /// chain was already initialized.
    pub fn initialize(&self) -> Option<Block> {
        let mut inner = self.write();
        if !inner.blocks.is_empty() {
            return None;
        }
        let genesis = Self::commit(&mut inner, Block::genesis());
        Some(genesis)
    }

    /// Seal `block` at the next height and commit it.
    ///
    /// Returns the block as committed.
    pub fn append(&self, block: Block) -> Block {
        let mut inner = self.write();
        Self::commit(&mut inner, block)
    }

    fn commit(inner: &mut ChainInner, mut block: Block) -> Block {
        let height = inner.height.map_or(0, |h| h + 1);
        let previous_hash = match inner.height {
            Some(_) => inner.blocks.last().map(|b| b.hash),
            None => None,
        };

        block.seal(height, previous_hash, current_timestamp());
        inner.blocks.push(block.clone());
        inner.height = Some(height);

        info!(height, hash = %block.hash, "block committed");
        block
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Height of the last committed block, `None` if uninitialized.
    pub fn height(&self) -> Option<u64> {
        self.read().height
    }

    /// Check if the chain has a genesis block.
    pub fn is_initialized(&self) -> bool {
        !self.read().blocks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.read().blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the latest block.
    pub fn latest_block(&self) -> Option<Block> {
        self.read().blocks.last().cloned()
    }

    /// Hash of the latest block.
    pub fn head(&self) -> Option<Hash> {
        self.read().blocks.last().map(|b| b.hash)
    }

    /// Run `f` over the committed blocks under the shared lock.
    pub fn with_blocks<R>(&self, f: impl FnOnce(&[Block]) -> R) -> R {
        let inner = self.read();
        f(&inner.blocks)
    }

    /// Copy of every committed block, in height order.
    pub fn snapshot(&self) -> Vec<Block> {
        let blocks = self.read().blocks.clone();
        debug!(blocks = blocks.len(), "snapshot taken");
        blocks
    }
}

impl Default for ChainStore {
    fn default() -> Self {
        Self::new()
    }
}
