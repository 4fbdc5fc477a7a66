//! Star payloads and the codec used to store them in block bodies.

use crate::crypto::Address;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A star descriptor submitted by a wallet holder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Star {
    /// Declination, e.g. `"+15 7m"`.
    pub dec: String,
    /// Right ascension, e.g. `"5h 2m"`.
    pub ra: String,
    /// Free-text story, ASCII only.
    pub story: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magnitude: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constellation: Option<String>,
}

/// Reasons a star payload is refused before it reaches the chain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StarError {
    #[error("right ascension must not be empty")]
    MissingRightAscension,
    #[error("declination must not be empty")]
    MissingDeclination,
    #[error("story exceeds {max} bytes (got {got})")]
    StoryTooLong { max: usize, got: usize },
    #[error("story must contain only ASCII characters")]
    StoryNotAscii,
}

impl Star {
    pub fn new(ra: impl Into<String>, dec: impl Into<String>, story: impl Into<String>) -> Self {
        Self {
            dec: dec.into(),
            ra: ra.into(),
            story: story.into(),
            magnitude: None,
            constellation: None,
        }
    }

    /// Check coordinates are present and the story fits the bound.
    pub fn validate(&self, max_story_bytes: usize) -> Result<(), StarError> {
        if self.ra.trim().is_empty() {
            return Err(StarError::MissingRightAscension);
        }
        if self.dec.trim().is_empty() {
            return Err(StarError::MissingDeclination);
        }
        if !self.story.is_ascii() {
            return Err(StarError::StoryNotAscii);
        }
        if self.story.len() > max_story_bytes {
            return Err(StarError::StoryTooLong {
                max: max_story_bytes,
                got: self.story.len(),
            });
        }
        Ok(())
    }
}

/// Body of a registration block: who registered which star.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarRecord {
    pub owner: Address,
    pub star: Star,
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("stored body is not valid hex: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("stored body is not a star record: {0}")]
    Json(#[from] serde_json::Error),
}

/// Encoding applied to star records before they are placed in a block body.
///
/// Implementations must satisfy `decode(encode(x)) == x`.
pub trait StarCodec: Send + Sync {
    fn encode(&self, record: &StarRecord) -> String;
    fn decode(&self, stored: &str) -> Result<StarRecord, CodecError>;
}

/// JSON, then hex.
#[derive(Debug, Clone, Copy, Default)]
pub struct HexJsonCodec;

impl StarCodec for HexJsonCodec {
    fn encode(&self, record: &StarRecord) -> String {
        // Serializing plain strings and an address into JSON cannot fail.
        let json = serde_json::to_vec(record).expect("star record serialization should not fail");
        hex::encode(json)
    }

    fn decode(&self, stored: &str) -> Result<StarRecord, CodecError> {
        let bytes = hex::decode(stored)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> StarRecord {
        StarRecord {
            owner: Address::from_bytes([7u8; 20]),
            star: Star::new("5h 2m", "+15 7m", "testing"),
        }
    }

    #[test]
    fn test_codec_inverts_encode() {
        let codec = HexJsonCodec;
        let stored = codec.encode(&record());
        assert!(stored.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(codec.decode(&stored).unwrap(), record());
    }

    #[test]
    fn test_codec_keeps_optional_fields() {
        let mut rec = record();
        rec.star.magnitude = Some("4.2".into());
        rec.star.constellation = Some("Orion".into());
        let codec = HexJsonCodec;
        assert_eq!(codec.decode(&codec.encode(&rec)).unwrap(), rec);
    }

    #[test]
    fn test_codec_rejects_garbage() {
        assert!(matches!(HexJsonCodec.decode("zz"), Err(CodecError::Hex(_))));
        assert!(matches!(
            HexJsonCodec.decode(&hex::encode(b"not json")),
            Err(CodecError::Json(_))
        ));
    }

    #[test]
    fn test_star_validation() {
        assert!(Star::new("5h 2m", "+15 7m", "ok").validate(10).is_ok());
        assert_eq!(
            Star::new(" ", "+15 7m", "ok").validate(10),
            Err(StarError::MissingRightAscension)
        );
        assert_eq!(
            Star::new("5h", "", "ok").validate(10),
            Err(StarError::MissingDeclination)
        );
        assert_eq!(
            Star::new("5h", "1m", "héllo").validate(10),
            Err(StarError::StoryNotAscii)
        );
        assert_eq!(
            Star::new("5h", "1m", "x".repeat(11)).validate(10),
            Err(StarError::StoryTooLong { max: 10, got: 11 })
        );
    }

    #[test]
    fn test_story_at_bound_is_accepted() {
        assert!(Star::new("5h", "1m", "x".repeat(10)).validate(10).is_ok());
    }
}
