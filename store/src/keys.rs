//! Signing-key and rotation-config storage traits.

use crate::StoreError;
use serde::{Deserialize, Serialize};
use sigrand_types::KeyHash;

/// One operator signing key.
///
/// Records are created in strictly increasing `id` order and never deleted;
/// signature history must remain verifiable forever. `last_boundary` is the
/// only mutable field: the highest job id this key is authorized to sign,
/// assigned when the key becomes active (`None` until then).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningKeyRecord {
    pub id: u64,
    pub key_hash: KeyHash,
    /// Raw big-endian RSA public exponent.
    pub exponent: Vec<u8>,
    /// Raw big-endian RSA modulus, leading zero bytes stripped.
    pub modulus: Vec<u8>,
    pub last_boundary: Option<u64>,
}

/// Rotation policy and key-sequence bookkeeping (singleton).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationConfig {
    /// Rotation period in job-id units.
    pub chance_to_switch: u64,
    /// Index of the key currently authorized to sign new jobs.
    pub active_key_index: u64,
    /// Total number of registered keys; the next expected registration id.
    pub available_key_counter: u64,
}

/// Trait for the signing-key table and its secondary indexes.
pub trait SigningKeyStore {
    fn key_by_id(&self, id: u64) -> Result<Option<SigningKeyRecord>, StoreError>;

    fn key_by_hash(&self, hash: KeyHash) -> Result<Option<SigningKeyRecord>, StoreError>;

    /// The key whose active window covered `job_id`: the record with the
    /// smallest assigned `last_boundary >= job_id`. Backends serve this from
    /// an ordered index over `(last_boundary, id)` — boundaries are assigned
    /// contiguously as rotation proceeds, so the first boundary at or above
    /// the job id identifies the unique covering key.
    fn key_covering_job(&self, job_id: u64) -> Result<Option<SigningKeyRecord>, StoreError>;

    fn rotation_config(&self) -> Result<Option<RotationConfig>, StoreError>;

    fn key_count(&self) -> Result<u64, StoreError>;
}
