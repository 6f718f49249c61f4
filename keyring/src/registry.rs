//! Key registration, rotation, and active-key resolution.

use sigrand_store::{RotationConfig, SigningKeyRecord, SigningKeyStore, WriteBatch};
use sigrand_types::{params, KeyHash};
use tracing::info;

use crate::KeyringError;

/// Register the next operator signing key.
///
/// Keys must arrive in strictly sequential id order: 0 bootstraps the
/// rotation config, every later registration must use the current
/// `available_key_counter`. The modulus must be non-empty with leading zero
/// bytes stripped, and its derived hash must be new.
pub fn register_key<S: SigningKeyStore>(
    store: &S,
    batch: &mut WriteBatch,
    id: u64,
    exponent: &[u8],
    modulus: &[u8],
) -> Result<KeyHash, KeyringError> {
    if modulus.is_empty() {
        return Err(KeyringError::InvalidInput(
            "modulus must have non-zero length".into(),
        ));
    }
    if modulus[0] == 0 {
        return Err(KeyringError::InvalidInput(
            "modulus must have leading zero bytes stripped".into(),
        ));
    }

    match store.rotation_config()? {
        None => {
            if id != 0 {
                return Err(KeyringError::OutOfOrder {
                    expected: 0,
                    got: id,
                });
            }
            batch.set_rotation(RotationConfig {
                chance_to_switch: params::DEFAULT_ROTATION_PERIOD,
                active_key_index: 0,
                available_key_counter: 1,
            });
        }
        Some(mut config) => {
            if id != config.available_key_counter {
                return Err(KeyringError::OutOfOrder {
                    expected: config.available_key_counter,
                    got: id,
                });
            }
            config.available_key_counter += 1;
            batch.set_rotation(config);
        }
    }

    let hash = sigrand_crypto::key_hash(modulus);
    if store.key_by_hash(hash)?.is_some() {
        return Err(KeyringError::DuplicateKey(hash));
    }

    batch.put_signing_key(SigningKeyRecord {
        id,
        key_hash: hash,
        exponent: exponent.to_vec(),
        modulus: modulus.to_vec(),
        last_boundary: None,
    });
    info!(key_id = id, key_hash = %hash, "signing key registered");
    Ok(hash)
}

/// Resolve the key that signs a newly allocated job, rotating if its window
/// is exhausted.
///
/// The active key's boundary is assigned lazily on first use as
/// `job_id + chance_to_switch - 1`. When `job_id` passes the boundary the
/// next registered key takes over with a fresh window; if no next key is
/// registered the whole request fails with `KeysExhausted` — rotation never
/// silently stalls or reuses a retired window.
///
/// Must be called with non-decreasing job ids (ids are allocated from a
/// monotonic counter, so this holds by construction).
pub fn advance_active_key<S: SigningKeyStore>(
    store: &S,
    batch: &mut WriteBatch,
    job_id: u64,
) -> Result<KeyHash, KeyringError> {
    let mut config = store.rotation_config()?.ok_or(KeyringError::KeyNotFound)?;
    let active = store
        .key_by_id(config.active_key_index)?
        .ok_or(KeyringError::KeyNotFound)?;

    let boundary = match active.last_boundary {
        Some(boundary) => boundary,
        None => {
            let boundary = window_end(job_id, config.chance_to_switch);
            batch.set_key_boundary(active.id, boundary);
            boundary
        }
    };

    if job_id <= boundary {
        return Ok(active.key_hash);
    }

    config.active_key_index += 1;
    if config.active_key_index >= config.available_key_counter {
        return Err(KeyringError::KeysExhausted);
    }
    let next = store
        .key_by_id(config.active_key_index)?
        .ok_or(KeyringError::KeyNotFound)?;
    batch.set_rotation(config.clone());
    batch.set_key_boundary(next.id, window_end(job_id, config.chance_to_switch));
    info!(
        key_id = next.id,
        key_hash = %next.key_hash,
        job_id,
        "rotated to next signing key"
    );
    Ok(next.key_hash)
}

/// Resolve the key that was active when `job_id` was assigned, independent of
/// any rotation that happened since.
pub fn key_for_job<S: SigningKeyStore>(
    store: &S,
    job_id: u64,
) -> Result<SigningKeyRecord, KeyringError> {
    store
        .key_covering_job(job_id)?
        .ok_or(KeyringError::KeyNotFound)
}

/// Update the rotation period. Applies to windows assigned from now on;
/// already-assigned boundaries are immutable.
pub fn set_rotation_period<S: SigningKeyStore>(
    store: &S,
    batch: &mut WriteBatch,
    period: u64,
) -> Result<(), KeyringError> {
    if period < params::MIN_ROTATION_PERIOD {
        return Err(KeyringError::InvalidInput(
            "rotation period must be at least 1".into(),
        ));
    }
    let mut config = store.rotation_config()?.ok_or(KeyringError::KeyNotFound)?;
    config.chance_to_switch = period;
    batch.set_rotation(config);
    Ok(())
}

fn window_end(job_id: u64, chance_to_switch: u64) -> u64 {
    // chance_to_switch >= 1 is enforced at registration/update time.
    job_id.saturating_add(chance_to_switch - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigrand_store::OracleStore;
    use sigrand_store_memory::MemoryStore;

    fn modulus(tag: u8) -> Vec<u8> {
        let mut m = vec![0xabu8; 32];
        m[1] = tag;
        m
    }

    fn register(store: &MemoryStore, id: u64, tag: u8) -> Result<KeyHash, KeyringError> {
        let mut batch = WriteBatch::new();
        let hash = register_key(store, &mut batch, id, &[0x01, 0x00, 0x01], &modulus(tag))?;
        store.commit(batch).unwrap();
        Ok(hash)
    }

    fn set_period(store: &MemoryStore, period: u64) {
        let mut batch = WriteBatch::new();
        set_rotation_period(store, &mut batch, period).unwrap();
        store.commit(batch).unwrap();
    }

    fn resolve(store: &MemoryStore, job_id: u64) -> Result<KeyHash, KeyringError> {
        let mut batch = WriteBatch::new();
        let hash = advance_active_key(store, &mut batch, job_id)?;
        store.commit(batch).unwrap();
        Ok(hash)
    }

    #[test]
    fn first_key_bootstraps_rotation_config() {
        let store = MemoryStore::new();
        register(&store, 0, 1).unwrap();
        let config = store.rotation_config().unwrap().unwrap();
        assert_eq!(config.chance_to_switch, params::DEFAULT_ROTATION_PERIOD);
        assert_eq!(config.active_key_index, 0);
        assert_eq!(config.available_key_counter, 1);
    }

    #[test]
    fn first_key_must_have_id_zero() {
        let store = MemoryStore::new();
        let err = register(&store, 1, 1).unwrap_err();
        assert!(matches!(
            err,
            KeyringError::OutOfOrder {
                expected: 0,
                got: 1
            }
        ));
    }

    #[test]
    fn keys_must_be_sequential() {
        let store = MemoryStore::new();
        register(&store, 0, 1).unwrap();
        let err = register(&store, 2, 2).unwrap_err();
        assert!(matches!(
            err,
            KeyringError::OutOfOrder {
                expected: 1,
                got: 2
            }
        ));
        register(&store, 1, 2).unwrap();
        assert_eq!(
            store.rotation_config().unwrap().unwrap().available_key_counter,
            2
        );
    }

    #[test]
    fn duplicate_modulus_rejected() {
        let store = MemoryStore::new();
        register(&store, 0, 1).unwrap();
        let err = register(&store, 1, 1).unwrap_err();
        assert!(matches!(err, KeyringError::DuplicateKey(_)));
    }

    #[test]
    fn empty_modulus_rejected() {
        let store = MemoryStore::new();
        let mut batch = WriteBatch::new();
        let err = register_key(&store, &mut batch, 0, &[0x03], &[]).unwrap_err();
        assert!(matches!(err, KeyringError::InvalidInput(_)));
    }

    #[test]
    fn leading_zero_modulus_rejected() {
        let store = MemoryStore::new();
        let mut batch = WriteBatch::new();
        let err = register_key(&store, &mut batch, 0, &[0x03], &[0x00, 0xff]).unwrap_err();
        assert!(matches!(err, KeyringError::InvalidInput(_)));
    }

    #[test]
    fn boundary_assigned_lazily_on_first_job() {
        let store = MemoryStore::new();
        register(&store, 0, 1).unwrap();
        set_period(&store, 10);
        assert!(store.key_by_id(0).unwrap().unwrap().last_boundary.is_none());

        resolve(&store, 0).unwrap();
        assert_eq!(
            store.key_by_id(0).unwrap().unwrap().last_boundary,
            Some(9)
        );
    }

    #[test]
    fn rotation_at_window_boundary() {
        let store = MemoryStore::new();
        let k0 = register(&store, 0, 1).unwrap();
        let k1 = register(&store, 1, 2).unwrap();
        set_period(&store, 3);

        assert_eq!(resolve(&store, 0).unwrap(), k0);
        assert_eq!(resolve(&store, 1).unwrap(), k0);
        assert_eq!(resolve(&store, 2).unwrap(), k0);
        assert_eq!(resolve(&store, 3).unwrap(), k1);
        assert_eq!(
            store.key_by_id(1).unwrap().unwrap().last_boundary,
            Some(5)
        );
        assert_eq!(
            store.rotation_config().unwrap().unwrap().active_key_index,
            1
        );
    }

    #[test]
    fn rotation_with_period_one_rotates_every_job() {
        let store = MemoryStore::new();
        let k0 = register(&store, 0, 1).unwrap();
        let k1 = register(&store, 1, 2).unwrap();
        set_period(&store, 1);

        assert_eq!(resolve(&store, 0).unwrap(), k0);
        assert_eq!(resolve(&store, 1).unwrap(), k1);
    }

    #[test]
    fn exhaustion_fails_without_staging_state() {
        let store = MemoryStore::new();
        register(&store, 0, 1).unwrap();
        set_period(&store, 1);
        resolve(&store, 0).unwrap();

        let mut batch = WriteBatch::new();
        let err = advance_active_key(&store, &mut batch, 1).unwrap_err();
        assert!(matches!(err, KeyringError::KeysExhausted));
        // Nothing committed; the registry still points at key 0.
        drop(batch);
        assert_eq!(
            store.rotation_config().unwrap().unwrap().active_key_index,
            0
        );
    }

    #[test]
    fn key_for_job_is_rotation_invariant() {
        let store = MemoryStore::new();
        register(&store, 0, 1).unwrap();
        register(&store, 1, 2).unwrap();
        register(&store, 2, 3).unwrap();
        set_period(&store, 2);

        for job_id in 0..6 {
            resolve(&store, job_id).unwrap();
        }
        // Jobs 0-1 -> key 0, 2-3 -> key 1, 4-5 -> key 2.
        assert_eq!(key_for_job(&store, 0).unwrap().id, 0);
        assert_eq!(key_for_job(&store, 1).unwrap().id, 0);
        assert_eq!(key_for_job(&store, 2).unwrap().id, 1);
        assert_eq!(key_for_job(&store, 3).unwrap().id, 1);
        assert_eq!(key_for_job(&store, 4).unwrap().id, 2);
        assert_eq!(key_for_job(&store, 5).unwrap().id, 2);
    }

    #[test]
    fn key_for_job_fails_outside_covered_range() {
        let store = MemoryStore::new();
        register(&store, 0, 1).unwrap();
        set_period(&store, 5);
        resolve(&store, 0).unwrap();
        assert!(matches!(
            key_for_job(&store, 5).unwrap_err(),
            KeyringError::KeyNotFound
        ));
    }

    #[test]
    fn rotation_period_must_be_positive() {
        let store = MemoryStore::new();
        register(&store, 0, 1).unwrap();
        let mut batch = WriteBatch::new();
        assert!(matches!(
            set_rotation_period(&store, &mut batch, 0).unwrap_err(),
            KeyringError::InvalidInput(_)
        ));
    }

    #[test]
    fn rotation_period_requires_initialized_registry() {
        let store = MemoryStore::new();
        let mut batch = WriteBatch::new();
        assert!(matches!(
            set_rotation_period(&store, &mut batch, 5).unwrap_err(),
            KeyringError::KeyNotFound
        ));
    }

    #[test]
    fn period_change_applies_to_future_windows_only() {
        let store = MemoryStore::new();
        let k0 = register(&store, 0, 1).unwrap();
        let k1 = register(&store, 1, 2).unwrap();
        set_period(&store, 2);
        resolve(&store, 0).unwrap(); // key 0 window: 0..=1

        set_period(&store, 5);
        assert_eq!(resolve(&store, 1).unwrap(), k0);
        assert_eq!(resolve(&store, 2).unwrap(), k1); // key 1 window: 2..=6
        assert_eq!(
            store.key_by_id(1).unwrap().unwrap().last_boundary,
            Some(6)
        );
    }
}
