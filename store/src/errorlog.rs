//! Operator error-log storage trait.

use crate::StoreError;
use serde::{Deserialize, Serialize};

/// One operator-reported fulfillment failure, kept in a bounded log so
/// callers can diagnose requests that will never be fulfilled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// Monotonic entry id; also the eviction order.
    pub id: u64,
    /// The failed request's correlation token.
    pub assoc_id: u64,
    pub message: String,
}

/// Trait for the bounded error log, keyed by entry id.
pub trait ErrorLogStore {
    fn error_log_len(&self) -> Result<u64, StoreError>;

    /// Up to `limit` oldest entry ids, ascending (eviction candidates).
    fn oldest_error_ids(&self, limit: u64) -> Result<Vec<u64>, StoreError>;

    fn get_error(&self, id: u64) -> Result<Option<ErrorRecord>, StoreError>;
}
