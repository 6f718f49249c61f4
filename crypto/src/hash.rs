//! SHA-256 digests, commitments, and key-hash derivation.

use sha2::{Digest, Sha256};
use sigrand_types::{Commitment, KeyHash};

/// Compute a SHA-256 digest of arbitrary data.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut output = [0u8; 32];
    output.copy_from_slice(&Sha256::digest(data));
    output
}

/// Compute the commitment delivered to callers: the SHA-256 digest of the
/// operator's signature bytes.
pub fn commitment(random_value: &[u8]) -> Commitment {
    Commitment(sha256(random_value))
}

/// Derive a key's compact hash from its modulus.
///
/// Packs the low 7 bits of each of the first 8 digest bytes into a `u64`.
/// The masking caps key hashes at `0x7f7f7f7f_7f7f7f7f`, keeping the
/// `ReplayScope::LEGACY` value (`u64::MAX`) unreachable.
pub fn key_hash(modulus: &[u8]) -> KeyHash {
    let digest = sha256(modulus);
    let mut value = 0u64;
    for byte in &digest[..8] {
        value = (value << 8) | u64::from(byte & 0x7f);
    }
    KeyHash(value)
}
