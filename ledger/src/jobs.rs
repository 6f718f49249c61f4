//! Job id allocation, lookup, and removal.

use sigrand_store::{config, ConfigStore, Job, JobStore, WriteBatch};

use crate::LedgerError;

/// Allocate the next job id and stage the counter increment.
///
/// The counter lives in the config store and only ever moves forward. The
/// increment is staged, not applied: if the surrounding operation fails, the
/// batch is discarded and the id is handed out again to the next request.
pub fn allocate_job_id<S: ConfigStore>(
    store: &S,
    batch: &mut WriteBatch,
) -> Result<u64, LedgerError> {
    let next = store.get_config(config::NEXT_JOB_ID, 0)?;
    batch.set_config(config::NEXT_JOB_ID, next + 1);
    Ok(next)
}

/// Stage insertion of a new pending job.
pub fn record_job(batch: &mut WriteBatch, job: Job) {
    batch.put_job(job);
}

/// Look up a pending job.
pub fn lookup<S: JobStore>(store: &S, job_id: u64) -> Result<Job, LedgerError> {
    store
        .get_job(job_id)?
        .ok_or(LedgerError::JobNotFound(job_id))
}

/// Stage removal of a job. Removing an absent id is a no-op.
pub fn remove(batch: &mut WriteBatch, job_id: u64) {
    batch.delete_job(job_id);
}

/// Stage removal of a batch of jobs, tolerating already-absent ids. Used to
/// reap jobs that will never be fulfilled; one stale id must never fail the
/// whole batch.
pub fn kill_jobs(batch: &mut WriteBatch, job_ids: &[u64]) {
    for &id in job_ids {
        batch.delete_job(id);
    }
}
