use sigrand_keyring::KeyringError;
use sigrand_ledger::LedgerError;
use sigrand_replay::ReplayError;
use sigrand_store::StoreError;
use sigrand_types::ReplayScope;
use thiserror::Error;

use crate::callback::CallbackError;

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("caller is not authorized for this operation")]
    Unauthorized,

    #[error("oracle is paused")]
    Paused,

    #[error("new randomness requests are paused")]
    RequestsPaused,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("randomness signature failed verification")]
    VerificationFailed,

    #[error("scope {} belongs to a key that is still active", scope.as_u64())]
    ScopeStillActive { scope: ReplayScope },

    #[error(transparent)]
    Callback(#[from] CallbackError),

    #[error(transparent)]
    Keyring(#[from] KeyringError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Replay(#[from] ReplayError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
