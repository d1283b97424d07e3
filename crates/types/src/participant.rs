//! Participant identifiers.
//!
//! Participants are keyed by opaque 32-byte values (typically the hash of an
//! on-chain holder key). The human readable form is plain lowercase hex.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Errors that can occur when parsing a participant identifier string.
#[derive(Debug, thiserror::Error)]
pub enum ParticipantIdError {
    #[error("participant id must be {expected} hex characters, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("participant id is not valid hexadecimal")]
    InvalidHex(#[from] hex::FromHexError),
}

/// Number of raw bytes in a participant identifier.
pub const PARTICIPANT_ID_BYTES: usize = 32;

/// Opaque fixed-size participant key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ParticipantId(pub [u8; PARTICIPANT_ID_BYTES]);

impl ParticipantId {
    /// Wrap raw key bytes.
    pub const fn new(bytes: [u8; PARTICIPANT_ID_BYTES]) -> Self {
        Self(bytes)
    }

    /// Derive a key from a human label (e.g. an off-chain user handle).
    pub fn from_label(label: &str) -> Self {
        Self(*blake3::hash(label.as_bytes()).as_bytes())
    }

    pub fn as_bytes(&self) -> &[u8; PARTICIPANT_ID_BYTES] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl From<[u8; PARTICIPANT_ID_BYTES]> for ParticipantId {
    fn from(value: [u8; PARTICIPANT_ID_BYTES]) -> Self {
        Self(value)
    }
}

impl From<ParticipantId> for String {
    fn from(value: ParticipantId) -> Self {
        value.to_hex()
    }
}

impl TryFrom<String> for ParticipantId {
    type Error = ParticipantIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl FromStr for ParticipantId {
    type Err = ParticipantIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let expected = PARTICIPANT_ID_BYTES * 2;
        if s.len() != expected {
            return Err(ParticipantIdError::InvalidLength {
                expected,
                actual: s.len(),
            });
        }
        let mut bytes = [0u8; PARTICIPANT_ID_BYTES];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // First 4 bytes are enough to tell holders apart in logs.
        write!(f, "ParticipantId({}..)", hex::encode(&self.0[..4]))
    }
}
