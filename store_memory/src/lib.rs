//! In-memory storage backend for the sigrand oracle protocol.
//!
//! The reference implementation of the `sigrand-store` traits: ordered maps
//! behind a single mutex, with `commit` applying a whole mutation batch under
//! one lock acquisition so a batch is observed either fully or not at all.
//!
//! Hosts with their own durability bring their own backend; this one backs
//! the test suites and any deployment content with process-lifetime state.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use sigrand_store::{
    ConfigStore, ErrorLogStore, ErrorRecord, Job, JobStore, Mutation, OracleStore, ReplayStore,
    RotationConfig, SigningKeyRecord, SigningKeyStore, StoreError, WriteBatch,
};
use sigrand_types::{KeyHash, ReplayScope};

#[derive(Default)]
struct Inner {
    config: BTreeMap<&'static str, u64>,
    jobs: BTreeMap<u64, Job>,
    keys: BTreeMap<u64, SigningKeyRecord>,
    /// Secondary index: key hash -> key id.
    keys_by_hash: BTreeMap<KeyHash, u64>,
    /// Secondary index: (last_boundary, id) -> key id, assigned boundaries only.
    keys_by_boundary: BTreeMap<(u64, u64), u64>,
    rotation: Option<RotationConfig>,
    replay: BTreeMap<ReplayScope, BTreeSet<u64>>,
    errors: BTreeMap<u64, ErrorRecord>,
}

impl Inner {
    fn apply(&mut self, mutation: Mutation) {
        match mutation {
            Mutation::SetConfig { key, value } => {
                self.config.insert(key, value);
            }
            Mutation::PutJob(job) => {
                self.jobs.insert(job.id, job);
            }
            Mutation::DeleteJob(id) => {
                self.jobs.remove(&id);
            }
            Mutation::PutSigningKey(record) => {
                self.keys_by_hash.insert(record.key_hash, record.id);
                if let Some(boundary) = record.last_boundary {
                    self.keys_by_boundary.insert((boundary, record.id), record.id);
                }
                self.keys.insert(record.id, record);
            }
            Mutation::SetKeyBoundary { id, last_boundary } => {
                if let Some(record) = self.keys.get_mut(&id) {
                    if let Some(old) = record.last_boundary {
                        self.keys_by_boundary.remove(&(old, id));
                    }
                    record.last_boundary = Some(last_boundary);
                    self.keys_by_boundary.insert((last_boundary, id), id);
                }
            }
            Mutation::SetRotation(config) => {
                self.rotation = Some(config);
            }
            Mutation::InsertReplay {
                scope,
                signing_value,
            } => {
                self.replay.entry(scope).or_default().insert(signing_value);
            }
            Mutation::DeleteReplay {
                scope,
                signing_value,
            } => {
                if let Some(set) = self.replay.get_mut(&scope) {
                    set.remove(&signing_value);
                    if set.is_empty() {
                        self.replay.remove(&scope);
                    }
                }
            }
            Mutation::PutErrorRecord(record) => {
                self.errors.insert(record.id, record);
            }
            Mutation::DeleteErrorRecord(id) => {
                self.errors.remove(&id);
            }
        }
    }
}

/// Thread-safe in-memory store.
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned mutex means a writer panicked mid-read; state is still
        // consistent because mutations only land inside `commit`.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for MemoryStore {
    fn get_config(&self, key: &str, default: u64) -> Result<u64, StoreError> {
        Ok(self.lock().config.get(key).copied().unwrap_or(default))
    }
}

impl JobStore for MemoryStore {
    fn get_job(&self, id: u64) -> Result<Option<Job>, StoreError> {
        Ok(self.lock().jobs.get(&id).cloned())
    }

    fn job_count(&self) -> Result<u64, StoreError> {
        Ok(self.lock().jobs.len() as u64)
    }
}

impl SigningKeyStore for MemoryStore {
    fn key_by_id(&self, id: u64) -> Result<Option<SigningKeyRecord>, StoreError> {
        Ok(self.lock().keys.get(&id).cloned())
    }

    fn key_by_hash(&self, hash: KeyHash) -> Result<Option<SigningKeyRecord>, StoreError> {
        let inner = self.lock();
        Ok(inner
            .keys_by_hash
            .get(&hash)
            .and_then(|id| inner.keys.get(id))
            .cloned())
    }

    fn key_covering_job(&self, job_id: u64) -> Result<Option<SigningKeyRecord>, StoreError> {
        let inner = self.lock();
        Ok(inner
            .keys_by_boundary
            .range((job_id, 0)..)
            .next()
            .and_then(|(_, id)| inner.keys.get(id))
            .cloned())
    }

    fn rotation_config(&self) -> Result<Option<RotationConfig>, StoreError> {
        Ok(self.lock().rotation.clone())
    }

    fn key_count(&self) -> Result<u64, StoreError> {
        Ok(self.lock().keys.len() as u64)
    }
}

impl ReplayStore for MemoryStore {
    fn replay_contains(&self, scope: ReplayScope, signing_value: u64) -> Result<bool, StoreError> {
        Ok(self
            .lock()
            .replay
            .get(&scope)
            .is_some_and(|set| set.contains(&signing_value)))
    }

    fn replay_front(&self, scope: ReplayScope, limit: u64) -> Result<Vec<u64>, StoreError> {
        self.replay_from(scope, 0, limit)
    }

    fn replay_from(
        &self,
        scope: ReplayScope,
        start: u64,
        limit: u64,
    ) -> Result<Vec<u64>, StoreError> {
        let inner = self.lock();
        Ok(match inner.replay.get(&scope) {
            Some(set) => set
                .range(start..)
                .take(limit.min(usize::MAX as u64) as usize)
                .copied()
                .collect(),
            None => Vec::new(),
        })
    }

    fn replay_count(&self, scope: ReplayScope) -> Result<u64, StoreError> {
        Ok(self
            .lock()
            .replay
            .get(&scope)
            .map_or(0, |set| set.len() as u64))
    }
}

impl ErrorLogStore for MemoryStore {
    fn error_log_len(&self) -> Result<u64, StoreError> {
        Ok(self.lock().errors.len() as u64)
    }

    fn oldest_error_ids(&self, limit: u64) -> Result<Vec<u64>, StoreError> {
        Ok(self
            .lock()
            .errors
            .keys()
            .take(limit.min(usize::MAX as u64) as usize)
            .copied()
            .collect())
    }

    fn get_error(&self, id: u64) -> Result<Option<ErrorRecord>, StoreError> {
        Ok(self.lock().errors.get(&id).cloned())
    }
}

impl OracleStore for MemoryStore {
    fn commit(&self, batch: WriteBatch) -> Result<(), StoreError> {
        let mut inner = self.lock();
        for mutation in batch.into_mutations() {
            inner.apply(mutation);
        }
        Ok(())
    }
}
