use sigrand_store::StoreError;
use sigrand_types::ReplayScope;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("signing value {signing_value} already used in scope {}", scope.as_u64())]
    ReplayDetected {
        scope: ReplayScope,
        signing_value: u64,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}
