use sigrand_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("job {0} not found")]
    JobNotFound(u64),

    #[error(transparent)]
    Store(#[from] StoreError),
}
