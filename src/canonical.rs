//! Canonical serialization for deterministic fingerprints.
//!
//! Committee tables are compared across runs and across implementations by
//! fingerprint. The fingerprint is xxh64 over canonical JSON.
//!
//! ## Determinism Guarantees
//!
//! - Stable field order: Struct fields serialize in declaration order
//! - Stable Vec order: slots, committees and members serialize in index order
//! - No HashMap allowed in fingerprinted data

use serde::Serialize;
use xxhash_rust::xxh64::xxh64;

use crate::types::SlotAssignment;

/// Serialize a value to canonical JSON bytes for hashing.
///
/// Fails only for maps with non-string keys or a failing custom `Serialize`
/// impl; use [`canonical_hash`] for the crate's own types, which have neither.
pub fn to_canonical_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(value)
}

/// Compute canonical hash of a serializable value.
pub fn canonical_hash<T: Serialize>(value: &T) -> u64 {
    // Plain structs, vectors and integers: serde_json cannot fail on them.
    let bytes = to_canonical_bytes(value).unwrap_or_default();
    xxh64(&bytes, 0)
}

/// Compute canonical hash and return as hex string.
pub fn canonical_hash_hex<T: Serialize>(value: &T) -> String {
    format!("{:016x}", canonical_hash(value))
}

/// Fingerprint of an ordered committee table.
///
/// Any change in slot order, shard ids, committee order or member order
/// changes the fingerprint.
pub fn assignment_fingerprint(assignments: &[SlotAssignment]) -> String {
    canonical_hash_hex(&assignments)
}
