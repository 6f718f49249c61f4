//! Abstract storage traits for the sigrand oracle protocol.
//!
//! Persistent keyed-table storage is an external collaborator: every backend
//! (the in-memory reference store, or a host-provided durable store)
//! implements these traits, and the protocol crates depend only on them.
//!
//! Reads go against committed state; writes are staged into a [`WriteBatch`]
//! mutation log and applied atomically by [`OracleStore::commit`]. Each
//! public oracle operation stages exactly one batch and commits it on
//! success, so every failure path leaves the store untouched.

pub mod batch;
pub mod config;
pub mod error;
pub mod errorlog;
pub mod jobs;
pub mod keys;
pub mod replay;

pub use batch::{Mutation, WriteBatch};
pub use config::ConfigStore;
pub use error::StoreError;
pub use errorlog::{ErrorLogStore, ErrorRecord};
pub use jobs::{Job, JobStore};
pub use keys::{RotationConfig, SigningKeyRecord, SigningKeyStore};
pub use replay::ReplayStore;

/// Full storage surface required by the oracle: all table reads plus atomic
/// batch commit.
pub trait OracleStore:
    ConfigStore + JobStore + SigningKeyStore + ReplayStore + ErrorLogStore
{
    /// Apply every staged mutation, atomically: all of them or none.
    fn commit(&self, batch: WriteBatch) -> Result<(), StoreError>;
}
