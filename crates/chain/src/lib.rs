//! Star registry for starchain.
//!
//! This crate brings together the chain store and the wallet crypto:
//! - **Ownership**: time-stamped challenges a wallet signs to prove control of an address
//! - **Registry**: gated star submission, one block per proven registration
//! - **Queries**: lookups by hash, height and owning address
//! - **Validator**: full-chain hash and linkage audit
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use starchain_chain::{RegistryConfig, StarRegistry};
//! use starchain_core::{Keypair, Star};
//! use starchain_storage::ChainStore;
//!
//! let registry = StarRegistry::new(Arc::new(ChainStore::new()), RegistryConfig::default());
//! let wallet = Keypair::generate();
//!
//! let message = registry.request_ownership_message(&wallet.address());
//! let signature = wallet.sign_wallet(&message).to_hex();
//! let star = Star::new("5h 2m", "+15 7m", "testing");
//! let block = registry
//!     .submit_star(&wallet.address(), &message, &signature, star)
//!     .unwrap();
//!
//! assert_eq!(block.height, 1);
//! assert!(registry.validate_chain().is_empty());
//! ```

pub mod error;
pub mod ownership;
pub mod query;
pub mod registry;
pub mod validator;

// Re-export commonly used types
pub use error::{QueryError, RegistryError};
pub use ownership::{ownership_message, Challenge, Clock, SystemClock, CHALLENGE_TAG};
pub use registry::{ChainInfo, RegistryConfig, StarRegistry};
pub use validator::{validate_blocks, IntegrityError};
