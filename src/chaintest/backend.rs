//! Simulated backend that checks fixture cases against the committee core.

use tracing::debug;

use super::fixtures::{ChainTestCase, ShuffleTestCase};
use super::HarnessError;
use crate::canonical::assignment_fingerprint;
use crate::committees::{initial_shard_and_committees_for_slots, GENESIS_CYCLES};
use crate::config::ProtocolConstants;
use crate::shuffle::{shuffle_indices, ShuffleError};
use crate::types::{Seed, SlotAssignment, ValidatorIndex, ValidatorRecord};

/// Runs individual fixture cases.
///
/// Shuffle cases run under `shuffle_constants` (only the list limit is
/// consulted). Chain cases carry their own constants.
#[derive(Debug, Clone, Default)]
pub struct SimulatedBackend {
    shuffle_constants: ProtocolConstants,
}

impl SimulatedBackend {
    /// Backend with default protocol constants.
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend that shuffles under the given constants.
    pub fn with_constants(constants: ProtocolConstants) -> Self {
        Self { shuffle_constants: constants }
    }

    /// Build the genesis table for the case's registry and check it.
    pub fn run_chain_test(&self, case: &ChainTestCase) -> Result<(), HarnessError> {
        let cfg = &case.config;
        let constants =
            ProtocolConstants::new(cfg.cycle_length, cfg.shard_count, cfg.target_committee_size)?;
        let validators = vec![ValidatorRecord::active(); cfg.validator_count];
        let table = initial_shard_and_committees_for_slots(&validators, &constants)?;

        expect_eq("slot_assignments", case.results.slot_assignments, table.len())?;

        let cycle = constants.cycle_length as usize;
        expect_eq("genesis_length", GENESIS_CYCLES * cycle, table.len())?;
        for (i, slot) in table.iter().enumerate().skip(cycle) {
            if *slot != table[i % cycle] {
                return Err(HarnessError::Mismatch {
                    field: "genesis_replication",
                    expected: format!("slot {} equal to slot {}", i, i % cycle),
                    actual: "differs".to_string(),
                });
            }
        }

        let first_cycle = &table[..cycle];
        expect_eq(
            "validator_coverage",
            (0..cfg.validator_count as ValidatorIndex).collect::<Vec<_>>(),
            covered_validators(first_cycle),
        )?;

        let per_slot: Vec<u64> = first_cycle.iter().map(|s| s.committees.len() as u64).collect();
        expect_eq(
            "committees_per_slot",
            vec![case.results.committees_per_slot; cycle],
            per_slot,
        )?;

        let fingerprint = assignment_fingerprint(&table);
        if let Some(expected) = &case.results.fingerprint {
            expect_eq("fingerprint", expected.as_str(), fingerprint.as_str())?;
        }

        debug!(
            validator_count = cfg.validator_count,
            fingerprint = %fingerprint,
            "Chain case passed"
        );
        Ok(())
    }

    /// Shuffle the case input under its seed and compare to the expected output.
    pub fn run_shuffle_test(&self, case: &ShuffleTestCase) -> Result<(), HarnessError> {
        let seed = Seed::from_hex(&case.seed).map_err(ShuffleError::from)?;
        let output = shuffle_indices(&seed, &case.input, &self.shuffle_constants)?;
        expect_eq("output", &case.output, &output)
    }
}

fn covered_validators(slots: &[SlotAssignment]) -> Vec<ValidatorIndex> {
    let mut all: Vec<ValidatorIndex> = slots.iter().flat_map(SlotAssignment::validators).collect();
    all.sort_unstable();
    all
}

fn expect_eq<T: PartialEq + std::fmt::Debug>(
    field: &'static str,
    expected: T,
    actual: T,
) -> Result<(), HarnessError> {
    if expected == actual {
        Ok(())
    } else {
        Err(HarnessError::Mismatch {
            field,
            expected: format!("{:?}", expected),
            actual: format!("{:?}", actual),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chaintest::fixtures::{ChainTestConfig, ChainTestResults};

    fn chain_case(validator_count: usize, committees_per_slot: u64) -> ChainTestCase {
        ChainTestCase {
            config: ChainTestConfig {
                validator_count,
                cycle_length: 4,
                shard_count: 8,
                target_committee_size: 2,
            },
            results: ChainTestResults {
                committees_per_slot,
                slot_assignments: 12,
                fingerprint: None,
            },
        }
    }

    #[test]
    fn test_chain_case_passes() {
        SimulatedBackend::new().run_chain_test(&chain_case(16, 2)).unwrap();
    }

    #[test]
    fn test_chain_case_reports_field() {
        let err = SimulatedBackend::new().run_chain_test(&chain_case(16, 1)).unwrap_err();
        match err {
            HarnessError::Mismatch { field, .. } => assert_eq!(field, "committees_per_slot"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_chain_case_rejects_zero_cycle() {
        let mut case = chain_case(16, 2);
        case.config.cycle_length = 0;
        let err = SimulatedBackend::new().run_chain_test(&case).unwrap_err();
        assert!(matches!(err, HarnessError::Config(_)));
    }

    #[test]
    fn test_shuffle_case() {
        let case = ShuffleTestCase {
            seed: format!("0x{}", "00".repeat(32)),
            input: (0..10).collect(),
            output: vec![8, 7, 6, 3, 2, 4, 0, 1, 9, 5],
        };
        SimulatedBackend::new().run_shuffle_test(&case).unwrap();
    }

    #[test]
    fn test_shuffle_case_bad_seed() {
        let case = ShuffleTestCase {
            seed: "0x1234".to_string(),
            input: vec![1, 2],
            output: vec![1, 2],
        };
        let err = SimulatedBackend::new().run_shuffle_test(&case).unwrap_err();
        assert!(matches!(err, HarnessError::Shuffle(ShuffleError::InvalidSeed(_))));
    }

    #[test]
    fn test_shuffle_case_mismatch() {
        let case = ShuffleTestCase {
            seed: "00".repeat(32),
            input: (0..10).collect(),
            output: (0..10).collect(),
        };
        let err = SimulatedBackend::new().run_shuffle_test(&case).unwrap_err();
        assert!(matches!(err, HarnessError::Mismatch { field: "output", .. }));
    }
}
