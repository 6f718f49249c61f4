//! Operation surface of the sigrand verifiable-randomness oracle.
//!
//! [`Oracle`] ties the component crates together: the job ledger, the key
//! registry, the anti-replay registry, and the fulfillment engine. Every
//! public operation reads committed state, stages its writes into one
//! [`WriteBatch`](sigrand_store::WriteBatch), and commits exactly once on
//! success; any failure path, including callback delivery, leaves the store
//! untouched.
//!
//! Principals arrive pre-authenticated from the host. The oracle only
//! compares them against its configured operator and pause authority.

pub mod callback;
pub mod error;
pub mod errorlog;
pub mod fulfillment;
pub mod logging;

pub use callback::{CallbackError, RandomnessReceiver};
pub use error::OracleError;

use sigrand_store::{config, Job, OracleStore, SigningKeyRecord, WriteBatch};
use sigrand_types::{Commitment, KeyHash, Principal, ReplayScope};
use sigrand_keyring::KeyringError;
use sigrand_replay::SweepOutcome;
use tracing::{debug, info};

pub struct Oracle<S, R> {
    store: S,
    receiver: R,
    operator: Principal,
    pause_authority: Principal,
}

impl<S: OracleStore, R: RandomnessReceiver> Oracle<S, R> {
    pub fn new(store: S, receiver: R, operator: Principal, pause_authority: Principal) -> Self {
        Self {
            store,
            receiver,
            operator,
            pause_authority,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn receiver(&self) -> &R {
        &self.receiver
    }

    pub fn receiver_mut(&mut self) -> &mut R {
        &mut self.receiver
    }

    /// Request a random value bound to `signing_value`.
    ///
    /// Allocates a job id, resolves (rotating if needed) the signing key for
    /// it, and reserves the nonce in that key's anti-replay scope. While the
    /// legacy-mirror flag is set the nonce is also reserved in the legacy
    /// scope. The caller is recorded for later delivery; `assoc_id` is the
    /// caller's correlation token, echoed back verbatim.
    pub fn request_rand(
        &mut self,
        caller: &Principal,
        assoc_id: u64,
        signing_value: u64,
    ) -> Result<u64, OracleError> {
        self.ensure_not_paused()?;
        if self.store.get_config(config::PAUSE_REQUESTS, 0)? != 0 {
            return Err(OracleError::RequestsPaused);
        }

        let mut batch = WriteBatch::new();
        let job_id = sigrand_ledger::allocate_job_id(&self.store, &mut batch)?;
        let key_hash = sigrand_keyring::advance_active_key(&self.store, &mut batch, job_id)?;
        sigrand_replay::reserve(&self.store, &mut batch, key_hash.into(), signing_value)?;
        if self.store.get_config(config::LEGACY_MIRROR, 0)? != 0 {
            sigrand_replay::legacy::mirror(&self.store, &mut batch, signing_value)?;
        }
        sigrand_ledger::record_job(
            &mut batch,
            Job {
                id: job_id,
                assoc_id,
                signing_value,
                caller: caller.clone(),
            },
        );
        self.store.commit(batch)?;

        debug!(job_id, assoc_id, caller = %caller, "randomness requested");
        Ok(job_id)
    }

    /// Fulfill a pending job with the operator's signature over its nonce.
    /// Delivers the commitment to the requesting caller and removes the job.
    pub fn fulfill_rand(
        &mut self,
        caller: &Principal,
        job_id: u64,
        random_value: &[u8],
    ) -> Result<Commitment, OracleError> {
        self.require_operator(caller)?;
        self.ensure_not_paused()?;
        fulfillment::fulfill(&self.store, &mut self.receiver, job_id, random_value)
    }

    /// Remove jobs that will never be fulfilled. Stale ids are tolerated so
    /// one already-removed job never fails the whole batch. Not pause-gated:
    /// reaping stays available while the oracle is halted.
    pub fn kill_jobs(&mut self, caller: &Principal, job_ids: &[u64]) -> Result<(), OracleError> {
        self.require_operator(caller)?;
        let mut batch = WriteBatch::new();
        sigrand_ledger::kill_jobs(&mut batch, job_ids);
        self.store.commit(batch)?;
        debug!(count = job_ids.len(), "jobs killed");
        Ok(())
    }

    /// Register the next operator signing key. Ids must be strictly
    /// sequential from 0; the first registration bootstraps the rotation
    /// config.
    pub fn register_key(
        &mut self,
        caller: &Principal,
        id: u64,
        exponent: &[u8],
        modulus: &[u8],
    ) -> Result<KeyHash, OracleError> {
        self.require_operator(caller)?;
        self.ensure_not_paused()?;
        let mut batch = WriteBatch::new();
        let hash = sigrand_keyring::register_key(&self.store, &mut batch, id, exponent, modulus)?;
        self.store.commit(batch)?;
        Ok(hash)
    }

    /// Set the rotation period: how many jobs each newly activated key covers.
    /// Applies to windows assigned from now on.
    pub fn set_rotation_period(&mut self, caller: &Principal, period: u64) -> Result<(), OracleError> {
        self.require_operator(caller)?;
        self.ensure_not_paused()?;
        let mut batch = WriteBatch::new();
        sigrand_keyring::set_rotation_period(&self.store, &mut batch, period)?;
        self.store.commit(batch)?;
        info!(period, "rotation period updated");
        Ok(())
    }

    /// Sweep up to `max_rows` anti-replay entries from a scope.
    ///
    /// A key's scope may only be swept once that key has retired; sweeping
    /// the legacy scope runs the cursor-based mirror sweep against the
    /// currently active key. Bounded per call; re-invoke until the returned
    /// `examined` count is zero.
    pub fn sweep_replay(
        &mut self,
        caller: &Principal,
        scope: ReplayScope,
        max_rows: u64,
    ) -> Result<SweepOutcome, OracleError> {
        self.require_operator(caller)?;
        self.ensure_not_paused()?;

        let mut batch = WriteBatch::new();
        let outcome = if scope.is_legacy() {
            let active = self.active_key()?;
            sigrand_replay::legacy::sweep(&self.store, &mut batch, active.key_hash.into(), max_rows)?
        } else {
            let key = self
                .store
                .key_by_hash(KeyHash(scope.as_u64()))?
                .ok_or(KeyringError::KeyNotFound)?;
            let rotation = self
                .store
                .rotation_config()?
                .ok_or(KeyringError::KeyNotFound)?;
            if key.id >= rotation.active_key_index {
                return Err(OracleError::ScopeStillActive { scope });
            }
            sigrand_replay::sweep_scope(&self.store, &mut batch, scope, max_rows)?
        };
        self.store.commit(batch)?;
        Ok(outcome)
    }

    /// Halt or resume the oracle. Gates every operation except this one, so
    /// a paused oracle can always be unpaused.
    pub fn pause(&mut self, caller: &Principal, paused: bool) -> Result<(), OracleError> {
        self.require_pause_authority(caller)?;
        let mut batch = WriteBatch::new();
        batch.set_config(config::PAUSED, paused as u64);
        self.store.commit(batch)?;
        info!(paused, "oracle pause flag set");
        Ok(())
    }

    /// Halt or resume intake of new requests only. Fulfillment and
    /// maintenance keep running, so the pending backlog can drain.
    pub fn pause_requests(&mut self, caller: &Principal, paused: bool) -> Result<(), OracleError> {
        self.require_pause_authority(caller)?;
        let mut batch = WriteBatch::new();
        batch.set_config(config::PAUSE_REQUESTS, paused as u64);
        self.store.commit(batch)?;
        info!(paused, "request pause flag set");
        Ok(())
    }

    /// Toggle mirroring of new nonces into the legacy anti-replay scope.
    pub fn set_legacy_mirror(&mut self, caller: &Principal, enabled: bool) -> Result<(), OracleError> {
        self.require_operator(caller)?;
        let mut batch = WriteBatch::new();
        batch.set_config(config::LEGACY_MIRROR, enabled as u64);
        self.store.commit(batch)?;
        info!(enabled, "legacy mirror flag set");
        Ok(())
    }

    /// Report a fulfillment failure for a request, keyed by its correlation
    /// token. The log is bounded; appending evicts the oldest entries beyond
    /// capacity.
    pub fn log_error(
        &mut self,
        caller: &Principal,
        assoc_id: u64,
        message: String,
    ) -> Result<u64, OracleError> {
        self.require_operator(caller)?;
        let mut batch = WriteBatch::new();
        let id = errorlog::append(&self.store, &mut batch, assoc_id, message)?;
        self.store.commit(batch)?;
        Ok(id)
    }

    /// Set the error log's retained-entry capacity. Takes effect on the next
    /// append.
    pub fn set_error_log_capacity(
        &mut self,
        caller: &Principal,
        capacity: u64,
    ) -> Result<(), OracleError> {
        self.require_operator(caller)?;
        if capacity < 1 {
            return Err(OracleError::InvalidInput(
                "error log capacity must be at least 1".into(),
            ));
        }
        let mut batch = WriteBatch::new();
        batch.set_config(config::ERROR_LOG_CAPACITY, capacity);
        self.store.commit(batch)?;
        Ok(())
    }

    pub fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    fn active_key(&self) -> Result<SigningKeyRecord, OracleError> {
        let rotation = self
            .store
            .rotation_config()?
            .ok_or(KeyringError::KeyNotFound)?;
        Ok(self
            .store
            .key_by_id(rotation.active_key_index)?
            .ok_or(KeyringError::KeyNotFound)?)
    }

    fn require_operator(&self, caller: &Principal) -> Result<(), OracleError> {
        if caller != &self.operator {
            return Err(OracleError::Unauthorized);
        }
        Ok(())
    }

    fn require_pause_authority(&self, caller: &Principal) -> Result<(), OracleError> {
        if caller != &self.pause_authority {
            return Err(OracleError::Unauthorized);
        }
        Ok(())
    }

    fn ensure_not_paused(&self) -> Result<(), OracleError> {
        if self.store.get_config(config::PAUSED, 0)? != 0 {
            return Err(OracleError::Paused);
        }
        Ok(())
    }
}
