//! Anti-replay registry storage trait.

use crate::StoreError;
use sigrand_types::ReplayScope;

/// Trait for the consumed-nonce sets, partitioned by scope.
///
/// Each signing key owns one scope; one fixed scope holds the legacy mirror.
/// For a given scope a signing value appears at most once. Iteration is
/// ascending and bounded, so sweep operations stay within a caller-supplied
/// per-invocation budget.
pub trait ReplayStore {
    fn replay_contains(&self, scope: ReplayScope, signing_value: u64) -> Result<bool, StoreError>;

    /// Up to `limit` smallest signing values in `scope`, ascending.
    fn replay_front(&self, scope: ReplayScope, limit: u64) -> Result<Vec<u64>, StoreError>;

    /// Up to `limit` signing values in `scope` starting at `start`
    /// (inclusive), ascending.
    fn replay_from(
        &self,
        scope: ReplayScope,
        start: u64,
        limit: u64,
    ) -> Result<Vec<u64>, StoreError>;

    fn replay_count(&self, scope: ReplayScope) -> Result<u64, StoreError>;
}
