//! Generic keyed configuration storage.
//!
//! Scalar runtime state — pause flags, the job-id counter, the legacy sweep
//! cursor, error-log bookkeeping — lives as named `u64` entries here rather
//! than as special-cased fields anywhere else.

use crate::StoreError;

/// Pause flag gating every operation except `pause` itself.
pub const PAUSED: &str = "paused";

/// Pause flag gating only `request_rand` (maintenance mode).
pub const PAUSE_REQUESTS: &str = "pause.requests";

/// Next job id to allocate. Monotonic; never reset.
pub const NEXT_JOB_ID: &str = "jobs.next_id";

/// Whether `request_rand` mirrors nonces into the legacy scope.
pub const LEGACY_MIRROR: &str = "legacy.mirror";

/// Smallest signing value not yet swept from the legacy mirror.
pub const LEGACY_SWEEP_CURSOR: &str = "legacy.sweep_cursor";

/// Next error-log entry id. Monotonic.
pub const ERROR_LOG_NEXT_ID: &str = "errors.next_id";

/// Maximum number of retained error-log entries.
pub const ERROR_LOG_CAPACITY: &str = "errors.capacity";

/// Trait for reading named configuration scalars.
///
/// Absent entries read as the supplied default, so a fresh deployment needs
/// no explicit initialization.
pub trait ConfigStore {
    fn get_config(&self, key: &str, default: u64) -> Result<u64, StoreError>;
}
