//! The star registry service.
//!
//! Ties the chain store to its external collaborators (signature verifier,
//! body codec, clock) and exposes the ownership workflow, the query layer
//! and the chain validator.

use crate::error::{QueryError, RegistryError};
use crate::ownership::{ownership_message, Challenge, Clock, SystemClock};
use crate::query;
use crate::validator::{validate_blocks, IntegrityError};
use serde::Serialize;
use starchain_core::{
    Address, Block, Ed25519Verifier, Hash, HexJsonCodec, SignatureVerifier, Star, StarCodec,
    StarRecord,
};
use starchain_storage::ChainStore;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub type Result<T> = std::result::Result<T, RegistryError>;

/// Registry configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// How long a challenge stays valid, in seconds.
    pub validation_window_secs: u64,
    /// Upper bound on a star story, in bytes.
    pub max_story_bytes: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            validation_window_secs: 300,
            max_story_bytes: 500,
        }
    }
}

/// Summary of the chain head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainInfo {
    pub height: Option<u64>,
    pub blocks: usize,
    pub latest_hash: Option<Hash>,
}

/// Registers stars on the chain for wallets that prove address ownership.
pub struct StarRegistry {
    chain: Arc<ChainStore>,
    config: RegistryConfig,
    verifier: Arc<dyn SignatureVerifier>,
    codec: Arc<dyn StarCodec>,
    clock: Arc<dyn Clock>,
}

impl StarRegistry {
    /// Create a registry over `chain` with ed25519 wallet signatures, the
    /// hex/JSON body codec and the system clock.
    pub fn new(chain: Arc<ChainStore>, config: RegistryConfig) -> Self {
        Self {
            chain,
            config,
            verifier: Arc::new(Ed25519Verifier),
            codec: Arc::new(HexJsonCodec),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_verifier(mut self, verifier: Arc<dyn SignatureVerifier>) -> Self {
        self.verifier = verifier;
        self
    }

    pub fn with_codec(mut self, codec: Arc<dyn StarCodec>) -> Self {
        self.codec = codec;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn chain(&self) -> &ChainStore {
        &self.chain
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Append the genesis block if the chain is empty.
    pub fn initialize(&self) {
        if let Some(genesis) = self.chain.initialize() {
            info!(hash = %genesis.hash, "genesis block created");
        }
    }

    // =========================================================================
    // Ownership workflow
    // =========================================================================

    /// Issue the challenge `address` must sign.
    pub fn request_ownership_message(&self, address: &Address) -> String {
        let message = ownership_message(address, self.clock.now());
        debug!(%address, %message, "challenge issued");
        message
    }

    /// Register `star` for `address` once the signed challenge checks out.
    ///
    /// Checks run in order: challenge shape, address binding, expiry,
    /// signature, star payload.
    /// Nothing is written unless all of them pass.
    pub fn submit_star(
        &self,
        address: &Address,
        message: &str,
        signature: &str,
        star: Star,
    ) -> Result<Block> {
        self.authorize(address, message, signature, &star)
            .inspect_err(|e| warn!(%address, reason = %e, "star submission rejected"))?;

        self.initialize();

        let record = StarRecord {
            owner: *address,
            star,
        };
        let block = self.chain.append(Block::with_star(&record, &*self.codec));
        info!(%address, height = block.height, hash = %block.hash, "star registered");
        Ok(block)
    }

    fn authorize(
        &self,
        address: &Address,
        message: &str,
        signature: &str,
        star: &Star,
    ) -> Result<()> {
        let challenge = Challenge::parse(message)?;
        challenge.check_address(address)?;
        challenge.check_window(self.clock.now(), self.config.validation_window_secs)?;

        if !self.verifier.verify(message, address, signature) {
            return Err(RegistryError::InvalidSignature);
        }

        star.validate(self.config.max_story_bytes)?;
        Ok(())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn get_block_by_hash(&self, hash: &Hash) -> std::result::Result<Block, QueryError> {
        self.chain.with_blocks(|blocks| query::find_by_hash(blocks, hash))
    }

    /// `None` for a height that has not been committed.
    pub fn get_block_by_height(&self, height: u64) -> Option<Block> {
        self.chain.with_blocks(|blocks| query::find_by_height(blocks, height))
    }

    /// Every star registered by `address`, oldest first.
    pub fn get_stars_by_wallet_address(
        &self,
        address: &Address,
    ) -> std::result::Result<Vec<StarRecord>, QueryError> {
        let blocks = self.chain.snapshot();
        query::stars_by_owner(&blocks, address, &*self.codec)
    }

    pub fn chain_info(&self) -> ChainInfo {
        self.chain.with_blocks(|blocks| ChainInfo {
            height: blocks.last().map(|b| b.height),
            blocks: blocks.len(),
            latest_hash: blocks.last().map(|b| b.hash),
        })
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Audit the whole chain. An empty list means it is consistent.
    pub fn validate_chain(&self) -> Vec<IntegrityError> {
        let blocks = self.chain.snapshot();
        let errors = validate_blocks(&blocks);
        if errors.is_empty() {
            debug!(blocks = blocks.len(), "chain validated");
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starchain_core::{DecodedBody, Keypair};
    use std::sync::atomic::{AtomicU64, Ordering};

    struct FixedClock(AtomicU64);

    impl Clock for FixedClock {
        fn now(&self) -> u64 {
            self.0.load(Ordering::SeqCst)
        }
    }

    fn setup() -> (StarRegistry, Arc<FixedClock>, Keypair) {
        let clock = Arc::new(FixedClock(AtomicU64::new(1_700_000_000)));
        let registry = StarRegistry::new(Arc::new(ChainStore::new()), RegistryConfig::default())
            .with_clock(clock.clone());
        (registry, clock, Keypair::generate())
    }

    fn star() -> Star {
        Star::new("5h 2m", "+15 7m", "testing")
    }

    #[test]
    fn test_submit_star_example() {
        let (registry, _, keypair) = setup();
        let address = keypair.address();

        let message = registry.request_ownership_message(&address);
        let signature = keypair.sign_wallet(&message).to_hex();
        let block = registry
            .submit_star(&address, &message, &signature, star())
            .unwrap();

        assert_eq!(block.height, 1);
        assert_eq!(registry.get_block_by_height(1), Some(block.clone()));
        assert_eq!(
            block.decode_body(&HexJsonCodec).unwrap(),
            DecodedBody::Star(StarRecord {
                owner: address,
                star: star()
            })
        );
        let stars: Vec<Star> = registry
            .get_stars_by_wallet_address(&address)
            .unwrap()
            .into_iter()
            .map(|r| r.star)
            .collect();
        assert_eq!(stars, vec![star()]);
    }

    #[test]
    fn test_challenge_at_window_edge_is_accepted() {
        let (registry, clock, keypair) = setup();
        let address = keypair.address();
        let message = registry.request_ownership_message(&address);
        let signature = keypair.sign_wallet(&message).to_hex();

        clock.0.fetch_add(300, Ordering::SeqCst);
        assert!(registry
            .submit_star(&address, &message, &signature, star())
            .is_ok());
    }

    #[test]
    fn test_expired_challenge_rejected_even_with_valid_signature() {
        let (registry, clock, keypair) = setup();
        let address = keypair.address();
        let message = registry.request_ownership_message(&address);
        let signature = keypair.sign_wallet(&message).to_hex();

        clock.0.fetch_add(301, Ordering::SeqCst);
        assert_eq!(
            registry.submit_star(&address, &message, &signature, star()),
            Err(RegistryError::ExpiredChallenge {
                elapsed: 301,
                window: 300
            })
        );
        assert_eq!(registry.chain().height(), None);
    }

    #[test]
    fn test_expiry_checked_before_signature() {
        let (registry, clock, keypair) = setup();
        let address = keypair.address();
        let message = registry.request_ownership_message(&address);

        clock.0.fetch_add(1_000, Ordering::SeqCst);
        assert!(matches!(
            registry.submit_star(&address, &message, "deadbeef", star()),
            Err(RegistryError::ExpiredChallenge { .. })
        ));
    }

    #[test]
    fn test_bad_signature_leaves_height_unchanged() {
        let (registry, _, keypair) = setup();
        let address = keypair.address();
        registry.initialize();

        let message = registry.request_ownership_message(&address);
        let forged = Keypair::generate().sign_wallet(&message).to_hex();
        assert_eq!(
            registry.submit_star(&address, &message, &forged, star()),
            Err(RegistryError::InvalidSignature)
        );
        assert_eq!(registry.chain().height(), Some(0));
    }

    #[test]
    fn test_challenge_for_other_address_rejected() {
        let (registry, _, keypair) = setup();
        let other = Keypair::generate();
        let message = registry.request_ownership_message(&other.address());
        let signature = keypair.sign_wallet(&message).to_hex();

        assert!(matches!(
            registry.submit_star(&keypair.address(), &message, &signature, star()),
            Err(RegistryError::MalformedChallenge(_))
        ));
    }

    #[test]
    fn test_oversized_story_rejected() {
        let (registry, _, keypair) = setup();
        let address = keypair.address();
        let message = registry.request_ownership_message(&address);
        let signature = keypair.sign_wallet(&message).to_hex();

        let long = Star::new("1h", "2m", "x".repeat(501));
        assert!(matches!(
            registry.submit_star(&address, &message, &signature, long),
            Err(RegistryError::InvalidStar(_))
        ));
        assert!(!registry.chain().is_initialized());
    }

    struct AcceptAll;

    impl SignatureVerifier for AcceptAll {
        fn verify(&self, _: &str, _: &Address, _: &str) -> bool {
            true
        }
    }

    #[test]
    fn test_custom_verifier_is_consulted() {
        let (registry, _, keypair) = setup();
        let registry = registry.with_verifier(Arc::new(AcceptAll));
        let address = keypair.address();
        let message = registry.request_ownership_message(&address);

        let block = registry
            .submit_star(&address, &message, "unsigned", star())
            .unwrap();
        assert_eq!(block.height, 1);
    }

    #[test]
    fn test_chain_info() {
        let (registry, _, _) = setup();
        assert_eq!(
            registry.chain_info(),
            ChainInfo {
                height: None,
                blocks: 0,
                latest_hash: None
            }
        );
        registry.initialize();
        let info = registry.chain_info();
        assert_eq!(info.height, Some(0));
        assert_eq!(info.latest_hash, registry.chain().head());
    }
}
