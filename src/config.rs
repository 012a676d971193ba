//! Protocol constants.
//!
//! Loaded once at process start, validated, then passed by reference into
//! every committee operation. Nothing in this crate holds a global copy.
//!
//! ## File Format
//!
//! ```toml
//! cycle_length = 64
//! shard_count = 1024
//! target_committee_size = 128
//! # optional, defaults to 2^24 - 2
//! shuffle_list_limit = 16777214
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use crate::canonical::canonical_hash_hex;
use crate::shuffle::RAND_MAX;

/// Default slots per cycle.
pub const DEFAULT_CYCLE_LENGTH: u64 = 64;
/// Default number of shards.
pub const DEFAULT_SHARD_COUNT: u64 = 1024;
/// Default target committee size.
pub const DEFAULT_TARGET_COMMITTEE_SIZE: u64 = 128;
/// Default (and largest permitted) shuffle input length.
pub const DEFAULT_SHUFFLE_LIST_LIMIT: usize = RAND_MAX as usize - 1;
/// Largest permitted slots per cycle.
pub const MAX_CYCLE_LENGTH: u64 = 1 << 20;

/// Error type for configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A constant that must be positive was zero.
    #[error("Invalid configuration: {0} must be greater than zero")]
    ZeroValue(&'static str),

    /// A constant exceeds its upper bound.
    #[error("Invalid configuration: {field} = {value} exceeds {max}")]
    TooLarge {
        /// Offending constant.
        field: &'static str,
        /// Configured value.
        value: u64,
        /// Largest allowed value.
        max: u64,
    },

    /// Shuffle limit is beyond what 3-byte sampling can serve.
    #[error("Invalid configuration: shuffle_list_limit {limit} exceeds {max}")]
    ShuffleLimitTooLarge {
        /// Configured limit.
        limit: usize,
        /// Largest allowed limit.
        max: usize,
    },

    /// Config file could not be read.
    #[error("Failed to read config {path}: {source}")]
    Read {
        /// Path that failed.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Config text could not be parsed.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Read-only protocol constants for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolConstants {
    /// Slots per cycle.
    pub cycle_length: u64,
    /// Total shards in the system.
    pub shard_count: u64,
    /// Desired committee size.
    pub target_committee_size: u64,
    /// Maximum number of indices a single shuffle accepts.
    pub shuffle_list_limit: usize,
}

impl Default for ProtocolConstants {
    fn default() -> Self {
        Self {
            cycle_length: DEFAULT_CYCLE_LENGTH,
            shard_count: DEFAULT_SHARD_COUNT,
            target_committee_size: DEFAULT_TARGET_COMMITTEE_SIZE,
            shuffle_list_limit: DEFAULT_SHUFFLE_LIST_LIMIT,
        }
    }
}

impl ProtocolConstants {
    /// Create validated constants with the default shuffle limit.
    pub fn new(
        cycle_length: u64,
        shard_count: u64,
        target_committee_size: u64,
    ) -> Result<Self, ConfigError> {
        let constants = Self {
            cycle_length,
            shard_count,
            target_committee_size,
            shuffle_list_limit: DEFAULT_SHUFFLE_LIST_LIMIT,
        };
        constants.validate()?;
        Ok(constants)
    }

    /// Override the shuffle limit, re-validating.
    pub fn with_shuffle_list_limit(mut self, limit: usize) -> Result<Self, ConfigError> {
        self.shuffle_list_limit = limit;
        self.validate()?;
        Ok(self)
    }

    /// Reject zero or out-of-range constants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cycle_length == 0 {
            return Err(ConfigError::ZeroValue("cycle_length"));
        }
        if self.cycle_length > MAX_CYCLE_LENGTH {
            return Err(ConfigError::TooLarge {
                field: "cycle_length",
                value: self.cycle_length,
                max: MAX_CYCLE_LENGTH,
            });
        }
        if self.shard_count == 0 {
            return Err(ConfigError::ZeroValue("shard_count"));
        }
        if self.target_committee_size == 0 {
            return Err(ConfigError::ZeroValue("target_committee_size"));
        }
        if self.shuffle_list_limit == 0 {
            return Err(ConfigError::ZeroValue("shuffle_list_limit"));
        }
        if self.shuffle_list_limit > DEFAULT_SHUFFLE_LIST_LIMIT {
            return Err(ConfigError::ShuffleLimitTooLarge {
                limit: self.shuffle_list_limit,
                max: DEFAULT_SHUFFLE_LIST_LIMIT,
            });
        }
        Ok(())
    }

    /// Parse and validate constants from TOML text.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let constants: Self = toml::from_str(s)?;
        constants.validate()?;
        Ok(constants)
    }

    /// Read, parse and validate constants from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Fingerprint of these constants.
    pub fn params_hash(&self) -> String {
        canonical_hash_hex(self)
    }
}
