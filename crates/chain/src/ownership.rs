//! Challenge messages that a wallet signs to prove it controls an address.
//!
//! A challenge has the form `<address>:<epochSeconds>:starRegistry`.

use crate::error::RegistryError;
use starchain_core::{current_timestamp, Address};

/// Trailing tag on every challenge.
pub const CHALLENGE_TAG: &str = "starRegistry";

/// Source of wall-clock seconds for issuing and checking challenges.
pub trait Clock: Send + Sync {
    fn now(&self) -> u64;
}

/// Reads the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        current_timestamp()
    }
}

/// Format the challenge for `address` issued at `timestamp`.
pub fn ownership_message(address: &Address, timestamp: u64) -> String {
    format!("{}:{}:{}", address.to_hex(), timestamp, CHALLENGE_TAG)
}

/// A parsed challenge message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Challenge {
    pub address: Address,
    pub timestamp: u64,
}

impl Challenge {
    /// Parse a challenge message.
    pub fn parse(message: &str) -> Result<Self, RegistryError> {
        let malformed = |reason: &str| RegistryError::MalformedChallenge(reason.to_string());

        let mut parts = message.split(':');
        let (Some(address), Some(timestamp), Some(tag), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed("expected <address>:<timestamp>:starRegistry"));
        };

        if tag != CHALLENGE_TAG {
            return Err(malformed("unknown challenge tag"));
        }
        let address = Address::from_hex(address).map_err(|_| malformed("invalid address"))?;
        let timestamp = timestamp
            .parse::<u64>()
            .map_err(|_| malformed("invalid timestamp"))?;

        Ok(Self { address, timestamp })
    }

    /// Check the challenge was issued to `address`.
    pub fn check_address(&self, address: &Address) -> Result<(), RegistryError> {
        if self.address != *address {
            return Err(RegistryError::MalformedChallenge(
                "challenge was issued to a different address".into(),
            ));
        }
        Ok(())
    }

    /// Check the challenge is no older than `window` seconds at `now`.
    ///
    /// Returns the elapsed seconds.
    pub fn check_window(&self, now: u64, window: u64) -> Result<u64, RegistryError> {
        let elapsed = now.checked_sub(self.timestamp).ok_or_else(|| {
            RegistryError::MalformedChallenge("challenge timestamp is in the future".into())
        })?;
        if elapsed > window {
            return Err(RegistryError::ExpiredChallenge { elapsed, window });
        }
        Ok(elapsed)
    }
}
