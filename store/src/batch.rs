//! Write batching — the transaction-scoped mutation log.
//!
//! Every public oracle operation stages its writes into one [`WriteBatch`]
//! and commits it exactly once on success. If the operation fails anywhere —
//! including callback delivery — the batch is dropped and nothing persists.
//!
//! # Usage
//!
//! ```ignore
//! let mut batch = WriteBatch::new();
//! batch.set_config(config::NEXT_JOB_ID, job_id + 1);
//! batch.put_job(job);
//! store.commit(batch)?;
//! ```

use crate::errorlog::ErrorRecord;
use crate::jobs::Job;
use crate::keys::{RotationConfig, SigningKeyRecord};
use sigrand_types::ReplayScope;

/// A single staged write. Mutations are blind (no read-backs), so a backend
/// can apply a whole batch under one lock or one transaction.
#[derive(Clone, Debug)]
pub enum Mutation {
    SetConfig { key: &'static str, value: u64 },
    PutJob(Job),
    DeleteJob(u64),
    PutSigningKey(SigningKeyRecord),
    SetKeyBoundary { id: u64, last_boundary: u64 },
    SetRotation(RotationConfig),
    InsertReplay { scope: ReplayScope, signing_value: u64 },
    DeleteReplay { scope: ReplayScope, signing_value: u64 },
    PutErrorRecord(ErrorRecord),
    DeleteErrorRecord(u64),
}

/// An ordered log of staged mutations.
#[derive(Debug, Default)]
pub struct WriteBatch {
    mutations: Vec<Mutation>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_config(&mut self, key: &'static str, value: u64) {
        self.mutations.push(Mutation::SetConfig { key, value });
    }

    pub fn put_job(&mut self, job: Job) {
        self.mutations.push(Mutation::PutJob(job));
    }

    /// Deleting an absent job is a no-op at apply time.
    pub fn delete_job(&mut self, id: u64) {
        self.mutations.push(Mutation::DeleteJob(id));
    }

    pub fn put_signing_key(&mut self, record: SigningKeyRecord) {
        self.mutations.push(Mutation::PutSigningKey(record));
    }

    pub fn set_key_boundary(&mut self, id: u64, last_boundary: u64) {
        self.mutations.push(Mutation::SetKeyBoundary { id, last_boundary });
    }

    pub fn set_rotation(&mut self, config: RotationConfig) {
        self.mutations.push(Mutation::SetRotation(config));
    }

    pub fn insert_replay(&mut self, scope: ReplayScope, signing_value: u64) {
        self.mutations.push(Mutation::InsertReplay {
            scope,
            signing_value,
        });
    }

    pub fn delete_replay(&mut self, scope: ReplayScope, signing_value: u64) {
        self.mutations.push(Mutation::DeleteReplay {
            scope,
            signing_value,
        });
    }

    pub fn put_error_record(&mut self, record: ErrorRecord) {
        self.mutations.push(Mutation::PutErrorRecord(record));
    }

    pub fn delete_error_record(&mut self, id: u64) {
        self.mutations.push(Mutation::DeleteErrorRecord(id));
    }

    pub fn len(&self) -> usize {
        self.mutations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }

    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    pub fn into_mutations(self) -> Vec<Mutation> {
        self.mutations
    }
}
