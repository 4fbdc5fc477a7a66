//! Chain storage for starchain.
//!
//! The chain lives only for the lifetime of the process. [`ChainStore`] is
//! the aggregate root: it exclusively owns the block sequence and the
//! current height, and the only way to add a block is [`ChainStore::append`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                    Registry Layer                        │
//! │      (ownership workflow, queries, chain validator)      │
//! └────────────────────────┬────────────────────────────────┘
//!                          │
//! ┌────────────────────────▼────────────────────────────────┐
//! │                      ChainStore                          │
//! │   RwLock ─┬─ blocks: Vec<Block>   (append only)          │
//! │           └─ height: Option<u64>  (None before genesis)  │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use starchain_storage::ChainStore;
//!
//! let chain = ChainStore::new();
//! chain.initialize();
//! assert_eq!(chain.height(), Some(0));
//! ```

pub mod chain;

pub use chain::ChainStore;
