//! The delivered random value: a SHA-256 commitment to the operator's signature.

use serde::{Deserialize, Serialize};

/// SHA-256 digest of the operator's signature over a job's signing value.
///
/// This is the value delivered to callers. Anyone holding the signature and
/// the operator's public key can recompute and verify it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Commitment(pub [u8; 32]);

impl Commitment {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl std::fmt::Display for Commitment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}
