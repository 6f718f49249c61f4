//! Bounded operator error log.
//!
//! Fulfillment happens off-protocol on the operator's schedule, so a request
//! that can never be fulfilled (say, a malformed nonce agreed out of band)
//! would otherwise fail silently. The operator reports such failures here,
//! keyed by the request's correlation token, and callers poll the log. The
//! log is bounded: appending beyond capacity evicts the oldest entries.

use sigrand_store::{config, ConfigStore, ErrorLogStore, ErrorRecord, WriteBatch};
use sigrand_types::params;

use crate::OracleError;

/// Append an error record, staging eviction of the oldest entries if the log
/// would exceed its configured capacity. Returns the new entry's id.
pub fn append<S: ConfigStore + ErrorLogStore>(
    store: &S,
    batch: &mut WriteBatch,
    assoc_id: u64,
    message: String,
) -> Result<u64, OracleError> {
    let id = store.get_config(config::ERROR_LOG_NEXT_ID, 0)?;
    batch.set_config(config::ERROR_LOG_NEXT_ID, id + 1);
    batch.put_error_record(ErrorRecord {
        id,
        assoc_id,
        message,
    });

    let capacity = store.get_config(
        config::ERROR_LOG_CAPACITY,
        params::DEFAULT_ERROR_LOG_CAPACITY,
    )?;
    let len_after = store.error_log_len()? + 1;
    if len_after > capacity {
        for old_id in store.oldest_error_ids(len_after - capacity)? {
            batch.delete_error_record(old_id);
        }
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigrand_store::OracleStore;
    use sigrand_store_memory::MemoryStore;

    fn log(store: &MemoryStore, assoc_id: u64, message: &str) -> u64 {
        let mut batch = WriteBatch::new();
        let id = append(store, &mut batch, assoc_id, message.into()).unwrap();
        store.commit(batch).unwrap();
        id
    }

    fn set_capacity(store: &MemoryStore, capacity: u64) {
        let mut batch = WriteBatch::new();
        batch.set_config(config::ERROR_LOG_CAPACITY, capacity);
        store.commit(batch).unwrap();
    }

    #[test]
    fn ids_are_monotonic() {
        let store = MemoryStore::new();
        assert_eq!(log(&store, 1, "a"), 0);
        assert_eq!(log(&store, 2, "b"), 1);
        assert_eq!(log(&store, 3, "c"), 2);
    }

    #[test]
    fn append_beyond_capacity_evicts_oldest() {
        let store = MemoryStore::new();
        set_capacity(&store, 2);
        log(&store, 1, "a");
        log(&store, 2, "b");
        log(&store, 3, "c");

        assert_eq!(store.error_log_len().unwrap(), 2);
        assert!(store.get_error(0).unwrap().is_none());
        assert_eq!(store.get_error(1).unwrap().unwrap().assoc_id, 2);
        assert_eq!(store.get_error(2).unwrap().unwrap().assoc_id, 3);
    }

    #[test]
    fn shrinking_capacity_evicts_on_next_append() {
        let store = MemoryStore::new();
        set_capacity(&store, 3);
        for i in 0..3 {
            log(&store, i, "x");
        }
        set_capacity(&store, 1);

        log(&store, 99, "y");
        assert_eq!(store.error_log_len().unwrap(), 1);
        assert_eq!(store.get_error(3).unwrap().unwrap().assoc_id, 99);
    }

    #[test]
    fn record_carries_message() {
        let store = MemoryStore::new();
        let id = log(&store, 7, "signature mismatch on agreed nonce");
        let record = store.get_error(id).unwrap().unwrap();
        assert_eq!(record.assoc_id, 7);
        assert_eq!(record.message, "signature mismatch on agreed nonce");
    }
}
