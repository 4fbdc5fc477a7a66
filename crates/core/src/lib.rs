//! Core primitives for starchain.
//!
//! This crate provides the fundamental types used throughout the registry:
//! - Blake3 digests
//! - Ed25519 wallet keys, addresses and signature verification
//! - Star payloads and the body codec
//! - The hash-linked block entity

pub mod block;
pub mod crypto;
pub mod hash;
pub mod star;

// Re-export commonly used types at the crate root
pub use block::{current_timestamp, Block, BlockBody, DecodedBody, GENESIS_MARKER};
pub use crypto::{
    Address, CryptoError, Ed25519Verifier, Keypair, PublicKey, Signature, SignatureVerifier,
    WalletSignature,
};
pub use hash::{hash, Hash, H256};
pub use star::{CodecError, HexJsonCodec, Star, StarCodec, StarError, StarRecord};
