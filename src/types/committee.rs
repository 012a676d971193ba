//! Committee and slot assignment types.
//!
//! ## Ordering
//!
//! Committee order inside a [`SlotAssignment`] and validator order inside a
//! committee are both consensus-visible. Nothing in this module sorts.

use serde::{Deserialize, Serialize};
use super::validator::ValidatorIndex;

/// Shard identifier.
pub type ShardId = u64;

/// Slot number.
pub type Slot = u64;

/// A committee bound to one shard for one slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ShardAndCommittee {
    /// Shard this committee attests to.
    pub shard: ShardId,
    /// Ordered validator indices.
    pub committee: Vec<ValidatorIndex>,
}

impl ShardAndCommittee {
    /// Create a new shard committee.
    pub fn new(shard: ShardId, committee: Vec<ValidatorIndex>) -> Self {
        Self { shard, committee }
    }

    /// Number of validators in the committee.
    pub fn len(&self) -> usize {
        self.committee.len()
    }

    /// Whether the committee has no members.
    pub fn is_empty(&self) -> bool {
        self.committee.is_empty()
    }
}

/// All committees active in one slot, in shard-bucket order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SlotAssignment {
    /// Committees for this slot.
    pub committees: Vec<ShardAndCommittee>,
}

impl SlotAssignment {
    /// Create a slot assignment from its committees.
    pub fn new(committees: Vec<ShardAndCommittee>) -> Self {
        Self { committees }
    }

    /// Committee bound to `shard`, if any. First match wins.
    pub fn committee_for_shard(&self, shard: ShardId) -> Option<&ShardAndCommittee> {
        self.committees.iter().find(|sc| sc.shard == shard)
    }

    /// Shard ids in committee order.
    pub fn shards(&self) -> Vec<ShardId> {
        self.committees.iter().map(|sc| sc.shard).collect()
    }

    /// Total validators across this slot's committees.
    pub fn validator_count(&self) -> usize {
        self.committees.iter().map(ShardAndCommittee::len).sum()
    }

    /// Iterate every validator index in this slot, committee by committee.
    pub fn validators(&self) -> impl Iterator<Item = ValidatorIndex> + '_ {
        self.committees.iter().flat_map(|sc| sc.committee.iter().copied())
    }
}

/// Aggregated attestation, reduced to the fields committee lookup needs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AggregatedAttestation {
    /// Slot the attestation is for.
    pub slot: Slot,
    /// Shard the attestation is for.
    pub shard: ShardId,
}

impl AggregatedAttestation {
    /// Create an attestation for a slot and shard.
    pub fn new(slot: Slot, shard: ShardId) -> Self {
        Self { slot, shard }
    }
}

/// Where a validator sits in an assignment table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorDuty {
    /// Offset of the slot within the table.
    pub slot: Slot,
    /// Shard the validator attests to.
    pub shard: ShardId,
    /// Position inside the committee.
    pub position: usize,
    /// Committee size.
    pub committee_len: usize,
}
