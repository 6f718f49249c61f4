//! Key hashes and anti-replay scopes.

use serde::{Deserialize, Serialize};

/// Compact identifier derived from a signing key's modulus.
///
/// Used as the anti-replay partition for the key and as a secondary lookup
/// key in the key registry. Derivation keeps only the low 7 bits of each
/// digest byte (see `sigrand-crypto`), so every key hash is at most
/// `0x7f7f7f7f_7f7f7f7f` and can never collide with [`ReplayScope::LEGACY`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct KeyHash(pub u64);

impl KeyHash {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for KeyHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// A namespace within the anti-replay registry.
///
/// Each signing key owns one scope (its [`KeyHash`]); one extra scope is
/// reserved for the legacy single-key mirror.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReplayScope(pub u64);

impl ReplayScope {
    /// The fixed scope mirroring the active key's nonces for consumers that
    /// predate key rotation. Key hashes cannot reach this value.
    pub const LEGACY: ReplayScope = ReplayScope(u64::MAX);

    pub fn key(hash: KeyHash) -> Self {
        Self(hash.0)
    }

    pub fn is_legacy(&self) -> bool {
        *self == Self::LEGACY
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<KeyHash> for ReplayScope {
    fn from(hash: KeyHash) -> Self {
        Self::key(hash)
    }
}
