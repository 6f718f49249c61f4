//! Property tests for the key-rotation schedule, driven through the full
//! request path (no RSA: requests never verify signatures).

use proptest::prelude::*;
use sigrand_keyring::KeyringError;
use sigrand_oracle::{CallbackError, Oracle, OracleError, RandomnessReceiver};
use sigrand_store_memory::MemoryStore;
use sigrand_types::{Commitment, Principal};

struct NullReceiver;

impl RandomnessReceiver for NullReceiver {
    fn receive_rand(
        &mut self,
        _caller: &Principal,
        _assoc_id: u64,
        _commitment: &Commitment,
    ) -> Result<(), CallbackError> {
        Ok(())
    }
}

fn operator() -> Principal {
    Principal::new("oracle.ops")
}

fn oracle_with_keys(key_count: u64) -> Oracle<MemoryStore, NullReceiver> {
    let mut oracle = Oracle::new(
        MemoryStore::new(),
        NullReceiver,
        operator(),
        Principal::new("oracle.pause"),
    );
    for id in 0..key_count {
        let mut modulus = vec![0xb7u8; 32];
        modulus[1] = id as u8;
        modulus[2] = (id >> 8) as u8;
        oracle
            .register_key(&operator(), id, &[0x01, 0x00, 0x01], &modulus)
            .unwrap();
    }
    oracle
}

proptest! {
    /// With period C and K keys from job 0, job j is signed by key j / C,
    /// and job C * K fails KeysExhausted. Holds for C = 1 as well.
    #[test]
    fn jobs_partition_across_keys_by_period(
        period in 1u64..=20,
        key_count in 1u64..=5,
    ) {
        let mut oracle = oracle_with_keys(key_count);
        oracle.set_rotation_period(&operator(), period).unwrap();

        let capacity = period * key_count;
        let caller = Principal::new("alice");
        for j in 0..capacity {
            let job_id = oracle.request_rand(&caller, j, 1000 + j).unwrap();
            prop_assert_eq!(job_id, j);
            let key = sigrand_keyring::key_for_job(oracle.store(), job_id).unwrap();
            prop_assert_eq!(key.id, j / period);
        }

        let err = oracle.request_rand(&caller, capacity, 9999).unwrap_err();
        prop_assert!(matches!(
            err,
            OracleError::Keyring(KeyringError::KeysExhausted)
        ));
    }

    /// The job-to-key mapping established at request time never changes,
    /// no matter how many rotations happen afterwards.
    #[test]
    fn key_assignment_is_stable_under_rotation(
        period in 1u64..=8,
        key_count in 2u64..=5,
    ) {
        let mut oracle = oracle_with_keys(key_count);
        oracle.set_rotation_period(&operator(), period).unwrap();

        let caller = Principal::new("alice");
        let capacity = period * key_count;
        let mut assigned = Vec::new();
        for j in 0..capacity {
            oracle.request_rand(&caller, j, 2000 + j).unwrap();
            assigned.push(sigrand_keyring::key_for_job(oracle.store(), j).unwrap().id);
        }
        for j in 0..capacity {
            let key = sigrand_keyring::key_for_job(oracle.store(), j).unwrap();
            prop_assert_eq!(key.id, assigned[j as usize]);
        }
    }
}
