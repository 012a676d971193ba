//! # beacon-committees
//!
//! Deterministic committee assignment for a proof-of-stake beacon chain.
//!
//! Given the validator registry, a 32-byte seed and the protocol constants,
//! the crate answers one question:
//!
//! > Which validators attest to which shard in which slot of this cycle?
//!
//! ## Core Contract
//!
//! 1. Select the active validators, in registry order
//! 2. Shuffle their indices with a seed-keyed, rejection-sampled Fisher–Yates
//! 3. Split the shuffled list into `cycle_length` slots, then each slot into
//!    `committees_per_slot` shard committees
//! 4. Bind each committee to a shard id counted from the crosslink start shard
//!
//! ## Architecture
//!
//! ```text
//! ValidatorRecord[] → active_validator_indices → shuffle_indices(Seed) → split_by_slot_shard → SlotAssignment[]
//!                                                                              ↑
//!                                                              ProtocolConstants (read-only)
//! ```
//!
//! ## Determinism Guarantees
//!
//! - Same registry + same seed + same constants → byte-identical table
//! - Slot order and committee order within a slot are part of the result
//! - Every active validator lands in exactly one (slot, shard) per cycle

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod types;
pub mod config;
pub mod shuffle;
pub mod partition;
pub mod committees;
pub mod canonical;
pub mod chaintest;

// Re-exports
pub use types::{
    AggregatedAttestation, Seed, SeedError, ShardAndCommittee, ShardId, Slot, SlotAssignment,
    ValidatorDuty, ValidatorIndex, ValidatorRecord, ValidatorStatus, SEED_LENGTH,
};
pub use config::{ConfigError, ProtocolConstants};
pub use shuffle::{shuffle, shuffle_indices, ShuffleError, RAND_MAX};
pub use partition::split_indices;
pub use committees::{
    active_validator_indices, attester_indices, committees_per_slot,
    initial_shard_and_committees_for_slots, shuffle_validators_to_committees,
    split_by_slot_shard, validator_duty, CommitteeError, GENESIS_CROSSLINK_START_SHARD,
    GENESIS_CYCLES,
};
pub use canonical::{assignment_fingerprint, canonical_hash, canonical_hash_hex, to_canonical_bytes};
pub use chaintest::{load_suites, run_suites, HarnessError, RunSummary, SimulatedBackend, TestSuite};
