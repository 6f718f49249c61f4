//! Protocol parameter defaults.

/// Default rotation period in job-id units: how many jobs a freshly activated
/// signing key covers before rotation advances to the next registered key.
/// Operator-tunable at runtime via `set_rotation_period`.
pub const DEFAULT_ROTATION_PERIOD: u64 = 1_000_000;

/// Smallest accepted rotation period.
pub const MIN_ROTATION_PERIOD: u64 = 1;

/// Default capacity of the operator error log. Oldest entries are evicted
/// once the log is full. Operator-tunable via `set_error_log_capacity`.
pub const DEFAULT_ERROR_LOG_CAPACITY: u64 = 100;
