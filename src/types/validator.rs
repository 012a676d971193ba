//! Validator registry types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Position of a validator in the canonical validator registry.
pub type ValidatorIndex = u32;

/// Lifecycle status of a validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidatorStatus {
    /// Deposited, waiting for activation.
    PendingActivation,
    /// Eligible for committee duty.
    Active,
    /// Requested exit, not yet processed.
    PendingExit,
    /// Exited, waiting for withdrawal.
    PendingWithdraw,
    /// Balance withdrawn.
    Withdrawn,
    /// Slashed for misbehaviour.
    Penalized,
}

/// Error returned when parsing an unknown status string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown validator status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for ValidatorStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending_activation" => Ok(Self::PendingActivation),
            "active" => Ok(Self::Active),
            "pending_exit" => Ok(Self::PendingExit),
            "pending_withdraw" => Ok(Self::PendingWithdraw),
            "withdrawn" => Ok(Self::Withdrawn),
            "penalized" => Ok(Self::Penalized),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

impl Default for ValidatorStatus {
    fn default() -> Self {
        Self::PendingActivation
    }
}

impl fmt::Display for ValidatorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PendingActivation => write!(f, "pending_activation"),
            Self::Active => write!(f, "active"),
            Self::PendingExit => write!(f, "pending_exit"),
            Self::PendingWithdraw => write!(f, "pending_withdraw"),
            Self::Withdrawn => write!(f, "withdrawn"),
            Self::Penalized => write!(f, "penalized"),
        }
    }
}

/// A validator record as stored in the registry.
///
/// The record's index is its position in the registry slice, it is not
/// stored on the record itself.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidatorRecord {
    /// Current lifecycle status.
    pub status: ValidatorStatus,
}

impl ValidatorRecord {
    /// Create a record with the given status.
    pub fn new(status: ValidatorStatus) -> Self {
        Self { status }
    }

    /// Create an active record.
    pub fn active() -> Self {
        Self::new(ValidatorStatus::Active)
    }

    /// Whether this validator is eligible for committee duty.
    pub fn is_active(&self) -> bool {
        self.status == ValidatorStatus::Active
    }
}
