//! Pending-job storage trait.

use crate::StoreError;
use serde::{Deserialize, Serialize};
use sigrand_types::Principal;

/// A pending randomness request awaiting fulfillment.
///
/// Created by `request_rand`, owned exclusively by the job ledger, destroyed
/// by `fulfill_rand` or `kill_jobs`. Job ids are never reused: boundary
/// comparisons in the key registry and the per-key anti-replay partitioning
/// both depend on ids never repeating.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: u64,
    /// Caller-opaque correlation token, echoed back in the callback.
    pub assoc_id: u64,
    /// The nonce the oracle's signature must cover.
    pub signing_value: u64,
    pub caller: Principal,
}

/// Trait for the pending-job table, keyed by job id.
pub trait JobStore {
    fn get_job(&self, id: u64) -> Result<Option<Job>, StoreError>;

    /// Number of pending jobs.
    fn job_count(&self) -> Result<u64, StoreError>;
}
