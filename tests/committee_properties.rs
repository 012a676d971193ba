//! Property tests for shuffling, partitioning and committee assignment.

use std::num::NonZeroUsize;

use proptest::prelude::*;

use beacon_committees::{
    committees_per_slot, shuffle, split_by_slot_shard, split_indices, validator_duty,
    ProtocolConstants, Seed,
};

fn seed_strategy() -> impl Strategy<Value = Seed> {
    any::<[u8; 32]>().prop_map(Seed::new)
}

fn constants_strategy() -> impl Strategy<Value = ProtocolConstants> {
    (1u64..=64, 1u64..=2048, 1u64..=256)
        .prop_map(|(cycle, shards, target)| ProtocolConstants::new(cycle, shards, target).unwrap())
}

proptest! {
    #[test]
    fn shuffle_is_a_permutation(seed in seed_strategy(), values in prop::collection::vec(any::<u32>(), 0..300)) {
        let mut shuffled = shuffle(&seed, &values, 1_000).unwrap();
        prop_assert_eq!(shuffled.len(), values.len());
        let mut original = values.clone();
        shuffled.sort_unstable();
        original.sort_unstable();
        prop_assert_eq!(shuffled, original);
    }

    #[test]
    fn shuffle_is_deterministic(seed in seed_strategy(), len in 0usize..300) {
        let values: Vec<u32> = (0..len as u32).collect();
        prop_assert_eq!(
            shuffle(&seed, &values, 1_000).unwrap(),
            shuffle(&seed, &values, 1_000).unwrap()
        );
    }

    #[test]
    fn split_is_balanced_and_lossless(len in 0usize..500, pieces in 1usize..80) {
        let values: Vec<u32> = (0..len as u32).collect();
        let parts = split_indices(&values, NonZeroUsize::new(pieces).unwrap());
        prop_assert_eq!(parts.len(), pieces);
        prop_assert_eq!(parts.concat(), values.clone());
        let min = parts.iter().map(|p| p.len()).min().unwrap();
        let max = parts.iter().map(|p| p.len()).max().unwrap();
        prop_assert!(max - min <= 1);
    }

    #[test]
    fn committees_per_slot_at_least_one(active in 0u64..10_000_000, constants in constants_strategy()) {
        let per_slot = committees_per_slot(active, &constants);
        prop_assert!(per_slot >= 1);
        let shard_bound = constants.shard_count / constants.cycle_length;
        if shard_bound > 0 {
            prop_assert!(per_slot <= shard_bound);
        }
    }

    #[test]
    fn assignment_partitions_validators(
        seed in seed_strategy(),
        len in 0usize..400,
        start in 0u64..4096,
        constants in constants_strategy(),
    ) {
        let indices: Vec<u32> = (0..len as u32).collect();
        let shuffled = shuffle(&seed, &indices, 1_000).unwrap();
        let table = split_by_slot_shard(&shuffled, start, &constants).unwrap();

        prop_assert_eq!(table.len() as u64, constants.cycle_length);
        let per_slot = committees_per_slot(len as u64, &constants);

        let mut seen: Vec<u32> = Vec::with_capacity(len);
        for (i, slot) in table.iter().enumerate() {
            prop_assert_eq!(slot.committees.len() as u64, per_slot);
            for (j, sc) in slot.committees.iter().enumerate() {
                let expected_shard = (start + i as u64 * per_slot + j as u64) % constants.shard_count;
                prop_assert_eq!(sc.shard, expected_shard);
            }
            seen.extend(slot.validators());
        }

        // Concatenating every committee in order reproduces the shuffle.
        prop_assert_eq!(&seen, &shuffled);
        seen.sort_unstable();
        prop_assert_eq!(seen, indices);
    }

    #[test]
    fn every_validator_has_a_duty(seed in seed_strategy(), len in 1usize..200) {
        let constants = ProtocolConstants::new(8, 64, 4).unwrap();
        let indices: Vec<u32> = (0..len as u32).collect();
        let shuffled = shuffle(&seed, &indices, 1_000).unwrap();
        let table = split_by_slot_shard(&shuffled, 0, &constants).unwrap();
        for v in indices {
            let duty = validator_duty(&table, v).unwrap();
            let committee = &table[duty.slot as usize].committee_for_shard(duty.shard).unwrap().committee;
            prop_assert_eq!(committee[duty.position], v);
        }
    }
}
