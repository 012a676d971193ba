//! Committee assignment.
//!
//! Turns a validator registry and a seed into a per-slot table of shard
//! committees:
//!
//! ```text
//! registry → active indices → shuffle(seed) → split by slot → split by shard → SlotAssignment[]
//!                                                                  ↑
//!                                                        committees_per_slot
//! ```
//!
//! Every function here is pure. [`ProtocolConstants`] is taken by reference
//! and never stored.

use std::num::NonZeroUsize;

use tracing::{debug, warn};

use crate::config::{ConfigError, ProtocolConstants};
use crate::partition::split_indices;
use crate::shuffle::{shuffle_indices, ShuffleError};
use crate::types::{
    AggregatedAttestation, Seed, ShardAndCommittee, ShardId, SlotAssignment, ValidatorDuty,
    ValidatorIndex, ValidatorRecord,
};

/// Number of cycles of committees produced at genesis.
pub const GENESIS_CYCLES: usize = 3;

/// Crosslink start shard used at genesis.
pub const GENESIS_CROSSLINK_START_SHARD: ShardId = 1;

/// Error type for committee operations.
#[derive(Debug, thiserror::Error)]
pub enum CommitteeError {
    /// Shuffle failed.
    #[error("Shuffle failed: {0}")]
    Shuffle(#[from] ShuffleError),

    /// Protocol constants are unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// No committee in the slot is bound to the shard.
    #[error("Unable to find committee for shard {shard}")]
    ShardNotFound {
        /// Shard the attestation referenced.
        shard: ShardId,
    },
}

/// Indices of active validators, in registry order.
pub fn active_validator_indices(validators: &[ValidatorRecord]) -> Vec<ValidatorIndex> {
    validators
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_active())
        .map(|(i, _)| i as ValidatorIndex)
        .collect()
}

/// Number of committees that populate one slot. Always at least 1.
///
/// The smaller of:
/// - `active_count / cycle_length / (target_committee_size * 2) + 1`
/// - `shard_count / cycle_length`
///
/// If the shard bound is zero the result is 1.
pub fn committees_per_slot(active_count: u64, constants: &ProtocolConstants) -> u64 {
    let cycle_length = constants.cycle_length.max(1);
    let committee_divisor = constants.target_committee_size.saturating_mul(2).max(1);
    let bound_on_validators = active_count / cycle_length / committee_divisor + 1;
    let bound_on_shards = constants.shard_count / cycle_length;
    if bound_on_shards == 0 {
        return 1;
    }
    bound_on_validators.min(bound_on_shards)
}

/// Split a shuffled index list into `cycle_length` slot assignments.
///
/// The `j`-th committee of slot `i` is bound to shard
/// `(crosslink_start_shard + i * committees_per_slot + j) % shard_count`.
pub fn split_by_slot_shard(
    shuffled: &[ValidatorIndex],
    crosslink_start_shard: ShardId,
    constants: &ProtocolConstants,
) -> Result<Vec<SlotAssignment>, CommitteeError> {
    constants.validate()?;
    let per_slot = committees_per_slot(shuffled.len() as u64, constants);
    let slots = non_zero(constants.cycle_length, "cycle_length")?;
    let shard_fan_out = non_zero(per_slot, "committees_per_slot")?;

    let assignments: Vec<SlotAssignment> = split_indices(shuffled, slots)
        .into_iter()
        .enumerate()
        .map(|(i, slot_validators)| {
            let shard_start = crosslink_start_shard.wrapping_add((i as u64).wrapping_mul(per_slot));
            let committees = split_indices(slot_validators, shard_fan_out)
                .into_iter()
                .enumerate()
                .map(|(j, members)| {
                    let shard = shard_start.wrapping_add(j as u64) % constants.shard_count;
                    ShardAndCommittee::new(shard, members.to_vec())
                })
                .collect();
            SlotAssignment::new(committees)
        })
        .collect();

    debug!(
        validator_count = shuffled.len(),
        committees_per_slot = per_slot,
        crosslink_start_shard = crosslink_start_shard,
        slots = assignments.len(),
        "Split validators by slot and shard"
    );

    Ok(assignments)
}

/// Shuffle the active validators and split them into slot/shard committees.
pub fn shuffle_validators_to_committees(
    seed: &Seed,
    validators: &[ValidatorRecord],
    crosslink_start_shard: ShardId,
    constants: &ProtocolConstants,
) -> Result<Vec<SlotAssignment>, CommitteeError> {
    let indices = active_validator_indices(validators);
    let shuffled = shuffle_indices(seed, &indices, constants)?;
    split_by_slot_shard(&shuffled, crosslink_start_shard, constants)
}

/// Committee table at genesis.
///
/// Shuffles with the zero seed from crosslink shard 1 and repeats the
/// resulting cycle [`GENESIS_CYCLES`] times, giving
/// `3 * cycle_length` slot assignments.
pub fn initial_shard_and_committees_for_slots(
    validators: &[ValidatorRecord],
    constants: &ProtocolConstants,
) -> Result<Vec<SlotAssignment>, CommitteeError> {
    let committees = shuffle_validators_to_committees(
        &Seed::ZERO,
        validators,
        GENESIS_CROSSLINK_START_SHARD,
        constants,
    )?;

    let mut initial = Vec::with_capacity(GENESIS_CYCLES * committees.len());
    for _ in 0..GENESIS_CYCLES {
        initial.extend(committees.iter().cloned());
    }
    Ok(initial)
}

/// Validator indices that attested for `attestation` in this slot.
pub fn attester_indices<'a>(
    slot: &'a SlotAssignment,
    attestation: &AggregatedAttestation,
) -> Result<&'a [ValidatorIndex], CommitteeError> {
    match slot.committee_for_shard(attestation.shard) {
        Some(sc) => Ok(sc.committee.as_slice()),
        None => {
            warn!(
                shard = attestation.shard,
                slot = attestation.slot,
                available = ?slot.shards(),
                "No committee for attestation shard"
            );
            Err(CommitteeError::ShardNotFound { shard: attestation.shard })
        }
    }
}

/// First place `validator` appears in `assignments`, scanning in slot order.
pub fn validator_duty(
    assignments: &[SlotAssignment],
    validator: ValidatorIndex,
) -> Option<ValidatorDuty> {
    assignments.iter().enumerate().find_map(|(slot, assignment)| {
        assignment.committees.iter().find_map(|sc| {
            sc.committee
                .iter()
                .position(|&v| v == validator)
                .map(|position| ValidatorDuty {
                    slot: slot as u64,
                    shard: sc.shard,
                    position,
                    committee_len: sc.len(),
                })
        })
    })
}

fn non_zero(value: u64, name: &'static str) -> Result<NonZeroUsize, ConfigError> {
    usize::try_from(value)
        .ok()
        .and_then(NonZeroUsize::new)
        .ok_or(ConfigError::ZeroValue(name))
}
