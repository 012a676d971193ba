//! Deterministic, seed-keyed index shuffle.
//!
//! ## Algorithm
//!
//! The seed is expanded into a byte stream by repeated hashing
//! (`source = sha256(source)`). Each 32-byte block yields ten 3-byte
//! big-endian samples; the trailing two bytes are unused. A Fisher–Yates
//! pass walks `index` from 0 to `len - 2`, and each step consumes samples
//! until one falls below `sample_max`, the largest multiple of `remaining`
//! not exceeding [`RAND_MAX`]. The accepted sample picks the swap partner
//! `index + sample % remaining`. Rejected samples are discarded, which keeps
//! the choice free of modulo bias.
//!
//! ## Determinism Guarantees
//!
//! - Same seed + same input order → identical output, on every platform
//! - Output is a permutation of the input (same multiset, same length)
//! - Input longer than the configured limit is rejected before any hashing

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::config::ProtocolConstants;
use crate::types::{Seed, SeedError, ValidatorIndex};

/// Bytes per random sample.
pub const RAND_BYTES: usize = 3;

/// Largest value a sample can take (`2^24 - 1`).
pub const RAND_MAX: u32 = (1 << (RAND_BYTES * 8)) - 1;

/// Error type for shuffle operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShuffleError {
    /// Seed was not a well-formed 32-byte value.
    #[error(transparent)]
    InvalidSeed(#[from] SeedError),

    /// Input exceeds the configured maximum.
    #[error("Shuffle input too large: {len} indices exceeds limit of {max}")]
    ListTooLarge {
        /// Input length.
        len: usize,
        /// Configured limit.
        max: usize,
    },
}

/// Shuffle `values` keyed by `seed`.
///
/// Fails with [`ShuffleError::ListTooLarge`] when `values.len()` exceeds `limit`
/// or the sampling ceiling `RAND_MAX - 1`, whichever is smaller.
pub fn shuffle<T: Clone>(seed: &Seed, values: &[T], limit: usize) -> Result<Vec<T>, ShuffleError> {
    let len = values.len();
    let max = limit.min(RAND_MAX as usize - 1);
    if len > max {
        return Err(ShuffleError::ListTooLarge { len, max });
    }

    let mut output = values.to_vec();
    let mut source: [u8; 32] = *seed.as_bytes();
    let mut index = 0usize;

    while index + 1 < len {
        let digest = Sha256::digest(source);
        source.copy_from_slice(&digest);
        for sample_bytes in source.chunks_exact(RAND_BYTES) {
            let remaining = len - index;
            if remaining == 1 {
                break;
            }
            let sample = sample_from_bytes(sample_bytes);
            let remaining = remaining as u32;
            let sample_max = RAND_MAX - RAND_MAX % remaining;
            if sample < sample_max {
                let replacement = index + (sample % remaining) as usize;
                output.swap(index, replacement);
                index += 1;
            }
        }
    }

    Ok(output)
}

/// Shuffle validator indices under the configured list limit.
pub fn shuffle_indices(
    seed: &Seed,
    indices: &[ValidatorIndex],
    constants: &ProtocolConstants,
) -> Result<Vec<ValidatorIndex>, ShuffleError> {
    let shuffled = shuffle(seed, indices, constants.shuffle_list_limit)?;
    debug!(
        seed = %seed,
        validator_count = indices.len(),
        "Shuffled validator indices"
    );
    Ok(shuffled)
}

fn sample_from_bytes(bytes: &[u8]) -> u32 {
    bytes.iter().fold(0u32, |acc, b| (acc << 8) | u32::from(*b))
}
