//! Core types for committee assignment.

pub mod validator;
pub mod seed;
pub mod committee;

pub use validator::{UnknownStatus, ValidatorIndex, ValidatorRecord, ValidatorStatus};
pub use seed::{Seed, SeedError, SEED_LENGTH};
pub use committee::{
    AggregatedAttestation, ShardAndCommittee, ShardId, Slot, SlotAssignment, ValidatorDuty,
};
