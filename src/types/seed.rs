//! Shuffle seed.
//!
//! A seed is exactly 32 bytes. Anything else is rejected at construction so
//! the shuffler never has to re-check the length.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Required seed length in bytes.
pub const SEED_LENGTH: usize = 32;

/// Error type for seed construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeedError {
    /// Seed bytes were not exactly [`SEED_LENGTH`] long.
    #[error("Invalid seed: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Required length.
        expected: usize,
        /// Supplied length.
        actual: usize,
    },

    /// Seed string was not valid hex.
    #[error("Invalid seed hex: {0}")]
    InvalidHex(String),
}

/// Randomness keying one cycle's shuffle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Seed([u8; SEED_LENGTH]);

impl Seed {
    /// The all-zero seed used at genesis.
    pub const ZERO: Seed = Seed([0u8; SEED_LENGTH]);

    /// Create a seed from a fixed-size array.
    pub const fn new(bytes: [u8; SEED_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Create a seed from a byte slice, rejecting any length other than 32.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, SeedError> {
        let array: [u8; SEED_LENGTH] = bytes.try_into().map_err(|_| SeedError::InvalidLength {
            expected: SEED_LENGTH,
            actual: bytes.len(),
        })?;
        Ok(Self(array))
    }

    /// Parse a hex string, with or without a `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, SeedError> {
        let trimmed = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(trimmed).map_err(|e| SeedError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8; SEED_LENGTH] {
        &self.0
    }

    /// Lowercase hex encoding with `0x` prefix.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl From<[u8; SEED_LENGTH]> for Seed {
    fn from(bytes: [u8; SEED_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for Seed {
    type Error = SeedError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_slice(bytes)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
