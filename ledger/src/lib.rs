//! Pending-job ledger for the sigrand oracle protocol.
//!
//! Allocates job ids from a monotonic counter held in the keyed config store
//! and owns the pending-request table. Ids are never reused, even after
//! deletion: key-rotation boundary comparisons and anti-replay partitioning
//! both depend on that.

pub mod error;
pub mod jobs;

pub use error::LedgerError;
pub use jobs::{allocate_job_id, kill_jobs, lookup, record_job, remove};
